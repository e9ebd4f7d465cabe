use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::{
    Platform, RemovalNotice,
    expand::{CommentSource, expand_all},
    wire::{AccessToken, CommentResponse, Forest, Me, MoreChildrenResponse, Thing},
};
use crate::{
    error::{Error, Result},
    models::{Comment, Submission},
};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Script-app credentials for the password grant.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

pub struct RedditClient {
    http: Client,
    token: String,
}

impl RedditClient {
    pub async fn connect(credentials: &Credentials) -> Result<RedditClient> {
        let http = Client::builder()
            .user_agent(credentials.user_agent.clone())
            .build()?;

        let token: AccessToken = http
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let token = match (token.access_token, token.error) {
            (Some(token), _) => token,
            (None, Some(err)) => return Err(Error::Auth(err)),
            (None, None) => return Err(Error::Auth("no access token granted".into())),
        };
        debug!(user = %credentials.username, "obtained access token");

        Ok(RedditClient { http, token })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{API_BASE}{path}"))
            .bearer_auth(&self.token)
            .query(&[("raw_json", "1")])
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{API_BASE}{path}"))
            .bearer_auth(&self.token)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = checked(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(request: RequestBuilder) -> Result<()> {
        checked(request.send().await?).await?;
        Ok(())
    }

    /// Fetches a listing of comments, either a submission's whole tree or the
    /// subtree under one comment.
    async fn fetch_forest(&self, link_id: &str, focus: Option<&str>, depth: Option<u32>) -> Result<Forest> {
        let article = link_id.trim_start_matches("t3_");
        let mut request = self.get(&format!("/comments/{article}")).query(&[("limit", "500")]);
        if let Some(focus) = focus {
            request = request.query(&[("comment", focus)]);
        }
        if let Some(depth) = depth {
            request = request.query(&[("depth", depth)]);
        }

        // [submission listing, comment listing]
        let mut listings: Vec<Thing> = Self::send(request).await?;
        if listings.len() < 2 {
            return Err(Error::Api {
                status: 200,
                body: format!("expected two listings for {article}, got {}", listings.len()),
            });
        }
        Ok(Forest::from_things(listings.split_off(1)))
    }

    async fn post_json_api(&self, path: &str, form: &[(&str, &str)]) -> Result<()> {
        Self::send_empty(self.post(path).form(form)).await
    }
}

fn fullname(comment_id: &str) -> String {
    format!("t1_{comment_id}")
}

async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CommentSource for RedditClient {
    async fn subtree(&self, link_id: &str, comment_id: &str) -> Result<Forest> {
        self.fetch_forest(link_id, Some(comment_id), None).await
    }

    async fn more_children(&self, link_id: &str, ids: &[String]) -> Result<Vec<Thing>> {
        let children = ids.join(",");
        let response: MoreChildrenResponse = Self::send(self.get("/api/morechildren").query(&[
            ("api_type", "json"),
            ("link_id", link_id),
            ("children", children.as_str()),
        ]))
        .await?;

        if !response.json.errors.is_empty() {
            return Err(Error::Api {
                status: 200,
                body: serde_json::to_string(&response.json.errors)?,
            });
        }
        Ok(response.json.data.map(|data| data.things).unwrap_or_default())
    }
}

#[async_trait]
impl Platform for RedditClient {
    async fn me(&self) -> Result<String> {
        let me: Me = Self::send(self.get("/api/v1/me")).await?;
        Ok(me.name)
    }

    async fn hot(&self, community: &str, limit: usize) -> Result<Vec<Submission>> {
        let listing: Thing = Self::send(
            self.get(&format!("/r/{community}/hot"))
                .query(&[("limit", limit)]),
        )
        .await?;

        let Thing::Listing(listing) = listing else {
            return Ok(Vec::new());
        };
        Ok(listing
            .children
            .into_iter()
            .filter_map(|thing| match thing {
                Thing::Link(link) => Some(Submission::from(link)),
                _ => None,
            })
            .take(limit)
            .collect())
    }

    async fn comment_tree(&self, submission: &Submission) -> Result<Vec<Comment>> {
        let link_id = submission.fullname();
        let forest = self.fetch_forest(&link_id, None, None).await?;
        expand_all(self, &link_id, forest).await
    }

    async fn refresh_replies(&self, comment: &Comment) -> Result<Vec<Comment>> {
        let forest = self.fetch_forest(&comment.link_id, Some(&comment.id), Some(2)).await?;
        Ok(forest
            .comments
            .into_iter()
            .find(|c| c.id == comment.id)
            .map(|c| c.replies)
            .unwrap_or_default())
    }

    async fn reply(&self, parent: &Comment, body: &str) -> Result<String> {
        let response: CommentResponse = Self::send(self.post("/api/comment").form(&[
            ("api_type", "json"),
            ("thing_id", parent.fullname().as_str()),
            ("text", body),
        ]))
        .await?;

        if !response.json.errors.is_empty() {
            return Err(Error::Api {
                status: 200,
                body: serde_json::to_string(&response.json.errors)?,
            });
        }
        response
            .json
            .data
            .into_iter()
            .flat_map(|data| data.things)
            .find_map(|thing| match thing {
                Thing::Comment(raw) => Some(raw.id),
                _ => None,
            })
            .ok_or_else(|| Error::Api {
                status: 200,
                body: format!("reply to {} returned no comment", parent.id),
            })
    }

    async fn distinguish(&self, comment_id: &str, sticky: bool) -> Result<()> {
        let fullname = fullname(comment_id);
        self.post_json_api(
            "/api/distinguish",
            &[
                ("api_type", "json"),
                ("id", fullname.as_str()),
                ("how", "yes"),
                ("sticky", if sticky { "true" } else { "false" }),
            ],
        )
        .await
    }

    async fn ignore_reports(&self, comment_id: &str) -> Result<()> {
        let fullname = fullname(comment_id);
        self.post_json_api("/api/ignore_reports", &[("id", fullname.as_str())])
            .await
    }

    async fn remove(&self, comment_id: &str, mod_note: Option<&str>) -> Result<()> {
        let fullname = fullname(comment_id);
        self.post_json_api("/api/remove", &[("id", fullname.as_str()), ("spam", "false")])
            .await?;

        if let Some(note) = mod_note.filter(|note| !note.is_empty()) {
            Self::send_empty(
                self.post("/api/v1/modactions/removal_reasons")
                    .form(&[("json", json!({ "item_ids": [fullname], "mod_note": note }).to_string())]),
            )
            .await?;
        }
        Ok(())
    }

    async fn approve(&self, comment_id: &str) -> Result<()> {
        let fullname = fullname(comment_id);
        self.post_json_api("/api/approve", &[("id", fullname.as_str())])
            .await
    }

    async fn send_removal_message(&self, comment_id: &str, notice: &RemovalNotice) -> Result<()> {
        let payload = json!({
            "item_id": [fullname(comment_id)],
            "message": notice.message,
            "title": notice.title,
            "type": notice.kind.as_str(),
        });
        Self::send_empty(
            self.post("/api/v1/modactions/removal_comment_message")
                .form(&[("json", payload.to_string())]),
        )
        .await
    }
}
