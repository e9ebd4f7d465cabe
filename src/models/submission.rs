use super::comment::Comment;

/// A thread in the community feed. `comments` holds the top-level comments
/// and is only populated once the full tree has been fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub stickied: bool,
    pub distinguished: Option<String>,
    pub comments: Vec<Comment>,
}

impl Submission {
    pub fn fullname(&self) -> String {
        format!("t3_{}", self.id)
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Submission {
        Submission { comments, ..self }
    }
}
