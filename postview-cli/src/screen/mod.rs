use postview_api::model::Post;
use postview_api::PostSource;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::list::PostList;

mod dialog;
pub use dialog::{CommentDialog, DialogAction, CANCEL_LABEL, CONFIRM_LABEL};

pub const POSTS_FAILED: &str = "Error retrieving posts";
pub const COMMENTS_FAILED: &str = "Error retrieving comments";
pub const LOADING_TITLE: &str = "Loading comment...";

/// Whatever draws the screen. All calls come from the controller's task.
pub trait Presenter {
    fn show_list(&mut self, list: &PostList);
    /// Short, non-blocking message that goes away on its own.
    fn show_notice(&mut self, message: &str);
    fn show_loading(&mut self, title: &str);
    fn dismiss_loading(&mut self);
    fn show_dialog(&mut self, dialog: &CommentDialog);
    fn dismiss_dialog(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    LoadingPosts,
    PostsShown,
    LoadingComment { post_id: u64 },
    CommentShown(CommentDialog),
}

/// Drives one posts fetch on activation and one comments fetch per selected post.
pub struct ScreenController<S, P> {
    source: S,
    presenter: P,
    list: PostList,
    state: ScreenState,
    selections: mpsc::UnboundedReceiver<Post>,
}

impl<S: PostSource, P: Presenter> ScreenController<S, P> {
    pub fn new(source: S, presenter: P) -> Self {
        let (tx, selections) = mpsc::unbounded_channel();
        let list = PostList::new(move |post: &Post| {
            // receiver lives as long as the controller, which owns the list
            let _ = tx.send(post.clone());
        });
        ScreenController {
            source,
            presenter,
            list,
            state: ScreenState::Idle,
            selections,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn list(&self) -> &PostList {
        &self.list
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Fetch the posts once and show whatever came back.
    ///
    /// A failed fetch leaves the list empty and raises a notice; nothing is retried.
    pub async fn activate(&mut self) {
        self.state = ScreenState::LoadingPosts;
        self.presenter.show_list(&self.list);

        match self.source.get_posts().await {
            Ok(posts) => {
                info!("fetched {} posts", posts.len());
                self.list.set_items(posts);
            }
            Err(e) => {
                warn!("failed to fetch posts: {e}");
                self.presenter.show_notice(POSTS_FAILED);
            }
        }

        self.state = ScreenState::PostsShown;
        self.presenter.show_list(&self.list);
    }

    pub fn redraw(&mut self) {
        self.presenter.show_list(&self.list);
    }

    /// Activate the cell for row `index` without fetching anything yet.
    ///
    /// Returns false if there is no such row.
    pub fn select_row(&mut self, index: usize) -> bool {
        let cells = self.list.render(index..index + 1);
        let Some(cell) = cells.first() else {
            debug!("no row at {index}");
            return false;
        };
        cell.activate();
        true
    }

    /// Activate the cell for row `index` and handle the resulting selection.
    pub async fn activate_row(&mut self, index: usize) -> bool {
        if !self.select_row(index) {
            return false;
        }
        self.handle_selections().await;
        true
    }

    /// Handle queued cell activations. Only the most recent one is acted on.
    pub async fn handle_selections(&mut self) -> Option<u64> {
        let mut latest = None;
        while let Ok(post) = self.selections.try_recv() {
            if let Some(Post { id, .. }) = latest.replace(post) {
                debug!("superseded selection of post {id}");
            }
        }
        let post = latest?;
        let id = post.id;
        self.on_item_activated(post).await;
        Some(id)
    }

    #[tracing::instrument(skip_all, fields(post_id = post.id))]
    pub async fn on_item_activated(&mut self, post: Post) {
        if let ScreenState::CommentShown(_) = self.state {
            self.dismiss_dialog(DialogAction::Cancel);
        }

        self.presenter.show_loading(LOADING_TITLE);
        self.state = ScreenState::LoadingComment { post_id: post.id };

        let result = self.source.get_comments(post.id).await;
        self.presenter.dismiss_loading();

        match result {
            Ok(comments) => {
                debug!("fetched {} comments", comments.len());
                let dialog = match comments.first() {
                    Some(comment) => CommentDialog::from_comment(comment),
                    None => CommentDialog::no_comments(&post),
                };
                self.presenter.show_dialog(&dialog);
                self.state = ScreenState::CommentShown(dialog);
            }
            Err(e) => {
                warn!("failed to fetch comments: {e}");
                self.presenter.show_notice(COMMENTS_FAILED);
                self.state = ScreenState::PostsShown;
            }
        }
    }

    /// Give up on a comments fetch that was dropped before it finished.
    pub fn abandon_selection(&mut self) {
        if let ScreenState::LoadingComment { post_id } = self.state {
            debug!("abandoned comments fetch for post {post_id}");
            self.presenter.dismiss_loading();
            self.state = ScreenState::PostsShown;
        }
    }

    /// Close the comment dialog if one is open.
    pub fn dismiss_dialog(&mut self, action: DialogAction) -> bool {
        if !matches!(self.state, ScreenState::CommentShown(_)) {
            return false;
        }
        debug!("dialog closed with {action:?}");
        self.presenter.dismiss_dialog();
        self.state = ScreenState::PostsShown;
        true
    }
}
