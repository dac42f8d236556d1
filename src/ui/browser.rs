//! File browser pagination.
//!
//! The listing is a single linear pass over the directory per
//! `Init`/`Redraw`: directories are skipped, a running index fills the
//! visible slots and keeps counting past the window to produce the
//! total, which clamps future page-down requests. Nothing is cached
//! across events, so remounts and external file changes are picked up
//! lazily on the next entry.

use crate::config::BROWSER_PAGE_SIZE;

/// Advance the scroll offset by one page, clamped so the window never
/// runs past the listing. A full-or-shorter listing never scrolls.
pub fn page_down(offset: usize, total: usize) -> usize {
    if offset + BROWSER_PAGE_SIZE < total {
        (offset + BROWSER_PAGE_SIZE).min(total - BROWSER_PAGE_SIZE)
    } else {
        offset
    }
}

/// Move the scroll offset back by one page. A clamped (partial) offset
/// first snaps back to its page boundary.
pub fn page_up(offset: usize) -> usize {
    let partial = offset % BROWSER_PAGE_SIZE;
    if partial != 0 {
        offset - partial
    } else {
        offset.saturating_sub(BROWSER_PAGE_SIZE)
    }
}
