use postview_api::model::{Comment, Post};

pub const CONFIRM_LABEL: &str = "Done";
pub const CANCEL_LABEL: &str = "Cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDialog {
    pub title: String,
    pub message: String,
    pub confirm: &'static str,
    pub cancel: &'static str,
}

/// Both buttons close the dialog; cancel does nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Done,
    Cancel,
}

impl CommentDialog {
    pub fn from_comment(comment: &Comment) -> Self {
        Self::new(comment.name.clone(), comment.body.clone())
    }

    /// Shown when a post comes back with zero comments.
    pub fn no_comments(post: &Post) -> Self {
        Self::new(
            "No comments".to_string(),
            format!("\"{}\" has no comments yet.", post.title),
        )
    }

    fn new(title: String, message: String) -> Self {
        CommentDialog {
            title,
            message,
            confirm: CONFIRM_LABEL,
            cancel: CANCEL_LABEL,
        }
    }
}
