use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use postview_api::PostSource;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::list::PostList;
use crate::screen::{CommentDialog, DialogAction, Presenter, ScreenController, ScreenState};
use crate::DONE;

mod command;
mod spinner;

pub use command::{Command, HELP};
use spinner::LoadingIndicator;

const TITLE_BAR: &str = "Posts";
const INPUT_POLL: Duration = Duration::from_millis(200);

/// Plain line-oriented rendering of the screen onto any writer.
pub struct TerminalPresenter<W> {
    out: W,
    page_size: usize,
    offset: usize,
    total: usize,
    spinner: bool,
    loading: Option<LoadingIndicator>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(page_size: usize, spinner: bool) -> Self {
        TerminalPresenter::new(io::stdout(), page_size, spinner)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, page_size: usize, spinner: bool) -> Self {
        TerminalPresenter {
            out,
            page_size: page_size.max(1),
            offset: 0,
            total: 0,
            spinner,
            loading: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the visible window by whole pages. Returns false when already at an edge.
    pub fn scroll(&mut self, pages: isize) -> bool {
        let last_page = self.total.saturating_sub(1) / self.page_size * self.page_size;
        let step = pages.unsigned_abs() * self.page_size;
        let next = if pages < 0 {
            self.offset.saturating_sub(step)
        } else {
            (self.offset + step).min(last_page)
        };
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!("failed to write to terminal: {e}");
        }
    }

    fn write_list(&mut self, list: &PostList) -> io::Result<()> {
        self.total = list.cell_count();
        if self.offset >= self.total {
            self.offset = 0;
        }
        let end = (self.offset + self.page_size).min(self.total);

        writeln!(self.out)?;
        if self.total == 0 {
            writeln!(self.out, "== {TITLE_BAR} ==")?;
            return self.out.flush();
        }
        writeln!(
            self.out,
            "== {TITLE_BAR} ({}-{} of {}) ==",
            self.offset + 1,
            end,
            self.total
        )?;
        for (row, cell) in (self.offset..).zip(list.render(self.offset..end)) {
            writeln!(self.out, "{:>4}. {}", row + 1, cell.title)?;
            for line in cell.body.lines() {
                writeln!(self.out, "      {line}")?;
            }
        }
        self.out.flush()
    }

    fn write_dialog(&mut self, dialog: &CommentDialog) -> io::Result<()> {
        let width = dialog
            .message
            .lines()
            .chain(std::iter::once(dialog.title.as_str()))
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            + 2;
        let rule = "─".repeat(width);
        writeln!(self.out, "┌{rule}┐")?;
        writeln!(self.out, "│ {:<w$} │", dialog.title, w = width - 2)?;
        writeln!(self.out, "├{rule}┤")?;
        for line in dialog.message.lines() {
            writeln!(self.out, "│ {:<w$} │", line, w = width - 2)?;
        }
        writeln!(self.out, "└{rule}┘")?;
        writeln!(self.out, "  [d] {}   [c] {}", dialog.confirm, dialog.cancel)?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_list(&mut self, list: &PostList) {
        if let Err(e) = self.write_list(list) {
            warn!("failed to draw list: {e}");
        }
    }

    fn show_notice(&mut self, message: &str) {
        self.print(&format!("! {message}"));
    }

    fn show_loading(&mut self, title: &str) {
        if self.spinner {
            self.loading = Some(LoadingIndicator::start(title));
        } else {
            self.print(title);
        }
    }

    fn dismiss_loading(&mut self) {
        if let Some(indicator) = self.loading.take() {
            indicator.stop();
        }
    }

    fn show_dialog(&mut self, dialog: &CommentDialog) {
        if let Err(e) = self.write_dialog(dialog) {
            warn!("failed to draw dialog: {e}");
        }
    }
}

/// Forward stdin lines from a plain thread, so a pending read never holds up shutdown.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("failed to read stdin: {e}");
                    break;
                }
            }
        }
    });
    rx
}

/// Handle input lines until the sender goes away, the user quits or Ctrl-C is hit.
pub async fn run<S, W>(
    screen: &mut ScreenController<S, TerminalPresenter<W>>,
    input: mpsc::UnboundedReceiver<String>,
) where
    S: PostSource,
    W: Write,
{
    run_until(screen, input, &DONE).await
}

/// Same as [`run`], stopping once `done` is set, even mid-fetch.
///
/// Rows entered while a fetch was running are selected together and only the
/// last one is fetched.
pub async fn run_until<S, W>(
    screen: &mut ScreenController<S, TerminalPresenter<W>>,
    mut input: mpsc::UnboundedReceiver<String>,
    done: &AtomicBool,
) where
    S: PostSource,
    W: Write,
{
    let mut held = None;
    loop {
        if done.load(Ordering::Relaxed) {
            info!("interrupted, exiting");
            break;
        }
        let command = match held.take() {
            Some(command) => command,
            None => {
                let line = match timeout(INPUT_POLL, input.recv()).await {
                    Err(_) => continue,
                    Ok(None) => {
                        debug!("input closed");
                        break;
                    }
                    Ok(Some(line)) => line,
                };
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                command
            }
        };

        let row = match command {
            Command::Open(row) => row,
            command => {
                if !dispatch(screen, command).await {
                    break;
                }
                continue;
            }
        };

        select_row(screen, row);
        while let Ok(line) = input.try_recv() {
            match Command::parse(&line) {
                None => {}
                Some(Command::Open(row)) => select_row(screen, row),
                Some(other) => {
                    held = Some(other);
                    break;
                }
            }
        }

        let interrupted = tokio::select! {
            _ = screen.handle_selections() => false,
            _ = wait_for(done) => true,
        };
        if interrupted {
            screen.abandon_selection();
            info!("interrupted during fetch, exiting");
            break;
        }
    }
}

fn select_row<S, W>(screen: &mut ScreenController<S, TerminalPresenter<W>>, row: usize)
where
    S: PostSource,
    W: Write,
{
    if !screen.select_row(row - 1) {
        screen
            .presenter_mut()
            .print(&format!("no post at row {row}"));
    }
}

async fn wait_for(flag: &AtomicBool) {
    while !flag.load(Ordering::Relaxed) {
        tokio::time::sleep(INPUT_POLL).await;
    }
}

/// Apply one command. Returns false when the loop should stop.
pub async fn dispatch<S, W>(
    screen: &mut ScreenController<S, TerminalPresenter<W>>,
    command: Command,
) -> bool
where
    S: PostSource,
    W: Write,
{
    match command {
        Command::Quit => return false,
        Command::Help => screen.presenter_mut().print(HELP),
        Command::Dismiss(action) => {
            if screen.dismiss_dialog(action) {
                screen.redraw();
            }
        }
        Command::NextPage | Command::PrevPage => {
            if let ScreenState::CommentShown(_) = screen.state() {
                screen.dismiss_dialog(DialogAction::Cancel);
            }
            let pages = if command == Command::NextPage { 1 } else { -1 };
            if screen.presenter_mut().scroll(pages) {
                screen.redraw();
            }
        }
        Command::Open(row) => {
            if !screen.activate_row(row - 1).await {
                screen
                    .presenter_mut()
                    .print(&format!("no post at row {row}"));
            }
        }
        Command::Unknown(input) => {
            screen
                .presenter_mut()
                .print(&format!("unknown command {input:?}, type ? for help"));
        }
    }
    true
}
