use std::ops::Range;
use std::sync::Arc;

use postview_api::model::Post;

type Listener = Arc<dyn Fn(&Post) + Send + Sync>;

/// One rendered row: a title region, a body region and an activation handler.
#[derive(Default)]
pub struct Cell {
    pub title: String,
    pub body: String,
    on_activate: Option<Box<dyn Fn() + Send + Sync>>,
}

impl Cell {
    /// Fire the handler registered by the last bind. Unbound cells do nothing.
    pub fn activate(&self) {
        if let Some(handler) = &self.on_activate {
            handler();
        }
    }

    pub fn is_bound(&self) -> bool {
        self.on_activate.is_some()
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("title", &self.title)
            .field("body", &self.body)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Projects a sequence of posts onto list cells.
///
/// Rows are bound on demand, so only the visible window ever gets text copied into it.
pub struct PostList {
    items: Arc<[Post]>,
    listener: Listener,
}

impl PostList {
    pub fn new(listener: impl Fn(&Post) + Send + Sync + 'static) -> Self {
        PostList {
            items: Arc::from(Vec::new()),
            listener: Arc::new(listener),
        }
    }

    /// Replace the backing sequence. `None` is the same as an empty list.
    pub fn set_items(&mut self, items: impl Into<Option<Vec<Post>>>) {
        self.items = Arc::from(items.into().unwrap_or_default());
    }

    pub fn cell_count(&self) -> usize {
        self.items.len()
    }

    pub fn create_cell(&self) -> Cell {
        Cell::default()
    }

    /// Copy row `index` into `cell` and point its handler at that row's post.
    ///
    /// Out-of-range rows leave the cell untouched and return false.
    pub fn bind_cell(&self, cell: &mut Cell, index: usize) -> bool {
        let Some(post) = self.items.get(index) else {
            return false;
        };
        cell.title.clone_from(&post.title);
        cell.body.clone_from(&post.body);

        let listener = Arc::clone(&self.listener);
        let items = Arc::clone(&self.items);
        cell.on_activate = Some(Box::new(move || listener(&items[index])));
        true
    }

    /// Build and bind the cells for `rows`, clamped to the current length.
    pub fn render(&self, rows: Range<usize>) -> Vec<Cell> {
        let end = rows.end.min(self.cell_count());
        let start = rows.start.min(end);
        (start..end)
            .map(|index| {
                let mut cell = self.create_cell();
                self.bind_cell(&mut cell, index);
                cell
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn post(id: u64, title: &str, body: &str) -> Post {
        Post {
            id,
            user_id: None,
            title: title.into(),
            body: body.into(),
        }
    }

    fn recording_list() -> (PostList, Arc<Mutex<Vec<Post>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let list = PostList::new(move |post: &Post| sink.lock().unwrap().push(post.clone()));
        (list, seen)
    }

    #[test]
    fn starts_empty() {
        let (list, _) = recording_list();
        assert_eq!(list.cell_count(), 0);
        assert!(list.render(0..10).is_empty());
    }

    #[test]
    fn binds_title_and_body_per_row() {
        let (mut list, _) = recording_list();
        let posts = vec![post(1, "A", "a"), post(2, "B", "b"), post(3, "C", "c")];
        list.set_items(posts.clone());

        assert_eq!(list.cell_count(), posts.len());
        for (i, p) in posts.iter().enumerate() {
            let mut cell = list.create_cell();
            assert!(list.bind_cell(&mut cell, i));
            assert_eq!(cell.title, p.title);
            assert_eq!(cell.body, p.body);
        }
    }

    #[test]
    fn empty_and_none_render_nothing() {
        let (mut list, _) = recording_list();
        list.set_items(vec![post(1, "A", "a")]);
        list.set_items(Vec::<Post>::new());
        assert_eq!(list.cell_count(), 0);
        assert!(list.render(0..usize::MAX).is_empty());

        list.set_items(vec![post(1, "A", "a")]);
        list.set_items(None::<Vec<Post>>);
        assert_eq!(list.cell_count(), 0);
    }

    #[test]
    fn activation_forwards_the_bound_post_once() {
        let (mut list, seen) = recording_list();
        list.set_items(vec![post(1, "A", "a"), post(2, "B", "b")]);

        let cells = list.render(0..2);
        cells[1].activate();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], post(2, "B", "b"));
    }

    #[test]
    fn rebinding_a_cell_replaces_its_handler() {
        let (mut list, seen) = recording_list();
        list.set_items(vec![post(1, "A", "a"), post(2, "B", "b")]);

        let mut cell = list.create_cell();
        list.bind_cell(&mut cell, 0);
        list.bind_cell(&mut cell, 1);
        cell.activate();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.iter().map(|p| p.id).collect::<Vec<_>>(), [2]);
    }

    #[test]
    fn old_cells_keep_their_post_after_refresh() {
        let (mut list, seen) = recording_list();
        list.set_items(vec![post(1, "A", "a")]);
        let stale = list.render(0..1);

        list.set_items(vec![post(9, "Z", "z")]);
        stale[0].activate();

        assert_eq!(seen.lock().unwrap()[0].id, 1);
    }

    #[test]
    fn render_clamps_window() {
        let (mut list, _) = recording_list();
        list.set_items((1..=5).map(|i| post(i, "t", "b")).collect::<Vec<_>>());

        assert_eq!(list.render(3..100).len(), 2);
        assert!(list.render(7..9).is_empty());
        assert!(!list.create_cell().is_bound());

        let mut cell = list.create_cell();
        assert!(!list.bind_cell(&mut cell, 5));
        assert!(!cell.is_bound());
    }
}
