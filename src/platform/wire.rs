//! The Reddit JSON data model ("things" wrapped in listings).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::models::{Comment, Submission};

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub(crate) enum Thing {
    #[serde(rename = "t1")]
    Comment(Box<RawComment>),
    #[serde(rename = "t3")]
    Link(RawLink),
    #[serde(rename = "more")]
    More(RawMore),
    #[serde(rename = "Listing")]
    Listing(Listing),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Listing {
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLink {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub stickied: bool,
    pub distinguished: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComment {
    pub id: String,
    pub parent_id: String,
    pub link_id: String,
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(deserialize_with = "float_timestamp")]
    pub created_utc: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub approved: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub removed: bool,
    pub distinguished: Option<String>,
    pub collapsed_reason_code: Option<String>,
    #[serde(default, deserialize_with = "listing_or_empty")]
    pub replies: Option<Box<Thing>>,
}

/// Placeholder standing in for comments that were not sent.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawMore {
    pub parent_id: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub children: Vec<String>,
}

impl RawMore {
    /// "Continue this thread" links carry no child ids; the subtree has to be
    /// fetched from its parent instead.
    pub fn is_continuation(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenResponse {
    pub json: MoreChildrenJson,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenJson {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    pub data: Option<MoreChildrenData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenData {
    #[serde(default)]
    pub things: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    pub json: CommentJson,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentJson {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    pub data: Option<MoreChildrenData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Me {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccessToken {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

fn float_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    DateTime::from_timestamp(secs.trunc() as i64, 0)
        .ok_or_else(|| serde::de::Error::custom(format!("timestamp {secs} out of range")))
}

/// Reddit sends an empty string instead of a listing when there are no replies.
fn listing_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Box<Thing>>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl From<RawLink> for Submission {
    fn from(link: RawLink) -> Self {
        Submission {
            id: link.id,
            title: link.title,
            stickied: link.stickied,
            distinguished: link.distinguished,
            comments: Vec::new(),
        }
    }
}

/// Tree of comments decoded from a listing, plus the placeholders found in it.
#[derive(Debug, Default)]
pub(crate) struct Forest {
    pub comments: Vec<Comment>,
    pub more: Vec<RawMore>,
}

impl Forest {
    pub fn from_things(things: Vec<Thing>) -> Forest {
        let mut forest = Forest::default();
        forest.comments = collect(things, &mut forest.more);
        forest
    }

    /// Attaches a comment below the node whose fullname is `parent_id`, or at
    /// the top level when the parent is the submission itself.
    pub fn graft(&mut self, parent_id: &str, comment: Comment) -> Result<(), Comment> {
        if parent_id.starts_with("t3_") {
            self.comments.push(comment);
            return Ok(());
        }
        graft_into(&mut self.comments, parent_id, comment)
    }

    pub fn find_mut(&mut self, fullname: &str) -> Option<&mut Comment> {
        find_in(&mut self.comments, fullname)
    }
}

fn graft_into(siblings: &mut [Comment], parent_id: &str, comment: Comment) -> Result<(), Comment> {
    match find_in(siblings, parent_id) {
        Some(parent) => {
            parent.replies.push(comment);
            Ok(())
        }
        None => Err(comment),
    }
}

fn find_in<'a>(siblings: &'a mut [Comment], fullname: &str) -> Option<&'a mut Comment> {
    for node in siblings.iter_mut() {
        if node.fullname() == fullname {
            return Some(node);
        }
        if let Some(found) = find_in(&mut node.replies, fullname) {
            return Some(found);
        }
    }
    None
}

fn collect(things: Vec<Thing>, more: &mut Vec<RawMore>) -> Vec<Comment> {
    let mut comments = Vec::new();
    for thing in things {
        match thing {
            Thing::Comment(raw) => comments.push((*raw).into_comment(more)),
            Thing::More(placeholder) => more.push(placeholder),
            Thing::Listing(listing) => comments.extend(collect(listing.children, more)),
            Thing::Link(_) => {}
        }
    }
    comments
}

impl RawComment {
    pub fn into_comment(self, more: &mut Vec<RawMore>) -> Comment {
        let replies = match self.replies {
            Some(thing) => collect(vec![*thing], more),
            None => Vec::new(),
        };
        Comment {
            id: self.id,
            link_id: self.link_id,
            author: self.author,
            body: self.body,
            created: self.created_utc,
            approved: self.approved,
            removed: self.removed,
            distinguished: self.distinguished,
            collapsed_reason_code: self.collapsed_reason_code,
            replies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_comment(id: &str, parent: &str, replies: serde_json::Value) -> serde_json::Value {
        json!({
            "kind": "t1",
            "data": {
                "id": id,
                "parent_id": parent,
                "link_id": "t3_thread",
                "author": "someone",
                "body": "hello",
                "created_utc": 1_700_000_000.0,
                "approved": null,
                "removed": false,
                "distinguished": null,
                "replies": replies,
            }
        })
    }

    #[test]
    fn decodes_nested_listing_and_placeholders() {
        let listing = json!({
            "kind": "Listing",
            "data": {
                "children": [
                    raw_comment("a", "t3_thread", json!({
                        "kind": "Listing",
                        "data": { "children": [
                            raw_comment("b", "t1_a", json!("")),
                            { "kind": "more", "data": {
                                "parent_id": "t1_a", "count": 2, "children": ["c", "d"]
                            }},
                        ]}
                    })),
                    raw_comment("e", "t3_thread", json!("")),
                    raw_comment("f", "t3_thread", json!(null)),
                ]
            }
        });
        let thing: Thing = serde_json::from_value(listing).unwrap();
        let forest = Forest::from_things(vec![thing]);

        assert_eq!(forest.comments.len(), 3);
        assert_eq!(forest.comments[0].replies[0].id, "b");
        assert!(forest.comments[1].replies.is_empty());
        assert!(forest.comments[2].replies.is_empty());
        assert!(!forest.comments[0].approved);
        assert_eq!(forest.comments[0].created.timestamp(), 1_700_000_000);
        assert_eq!(forest.more.len(), 1);
        assert_eq!(forest.more[0].children, ["c", "d"]);
    }

    #[test]
    fn grafts_under_parent_or_top_level() {
        let mut forest = Forest::default();
        let node = |id: &str| Comment {
            id: id.into(),
            ..Default::default()
        };
        forest.graft("t3_thread", node("a")).unwrap();
        forest.graft("t1_a", node("b")).unwrap();
        forest.graft("t1_b", node("c")).unwrap();
        assert!(forest.graft("t1_missing", node("z")).is_err());

        assert_eq!(forest.comments.len(), 1);
        assert_eq!(forest.comments[0].replies[0].replies[0].id, "c");
    }
}
