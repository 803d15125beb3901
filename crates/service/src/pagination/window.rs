//! Sliding-window page selection for pagination bars.
//!
//! A window of up to five page numbers follows the current page; page 1 and
//! the last page stay reachable through shortcut controls, with an ellipsis
//! wherever more than one page is skipped. Recomputed on every render.

use serde::Serialize;

use super::PagingInfo;

/// Pages on each side of the current one.
pub const WINDOW_RADIUS: u64 = 2;
/// Pages shown once the window is clipped at either edge.
pub const WINDOW_SPAN: u64 = WINDOW_RADIUS * 2 + 1;
/// Up to this many pages, every page gets its own control.
pub const SHOW_ALL_THRESHOLD: u64 = 7;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current_page: u64,
    pub last_page: u64,
    pub visible_pages: Vec<u64>,
    /// Page 1 sits outside the window: show it plus a jump-to-first control.
    pub show_first: bool,
    /// The last page sits outside the window: show it plus a jump-to-last control.
    pub show_last: bool,
    pub show_leading_ellipsis: bool,
    pub show_trailing_ellipsis: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub start_record: u64,
    pub end_record: u64,
    pub total: u64,
}

impl PageWindow {
    pub fn compute(info: &PagingInfo) -> Self {
        let PagingInfo { page, pages, size, total } = *info;
        let (start, end) = visible_range(page, pages);

        Self {
            current_page: page,
            last_page: pages,
            visible_pages: (start..=end).collect(),
            show_first: start > 1,
            show_last: end < pages,
            show_leading_ellipsis: start > 2,
            show_trailing_ellipsis: end < pages.saturating_sub(1),
            has_previous: page > 1,
            has_next: page < pages,
            start_record: page.saturating_sub(1).saturating_mul(size).saturating_add(1),
            end_record: page.saturating_mul(size).min(total),
            total,
        }
    }

    pub fn is_current(&self, page: u64) -> bool {
        page == self.current_page
    }

    /// `"51-62 of 1,062"`, or `None` for an empty result set.
    pub fn range_label(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        Some(format!(
            "{}-{} of {}",
            self.start_record,
            self.end_record,
            group_thousands(self.total)
        ))
    }
}

fn visible_range(page: u64, pages: u64) -> (u64, u64) {
    if pages <= 1 {
        return (1, 1);
    }
    if pages <= SHOW_ALL_THRESHOLD {
        return (1, pages);
    }

    let page = page.clamp(1, pages);
    let mut start = page.saturating_sub(WINDOW_RADIUS).max(1);
    let mut end = page.saturating_add(WINDOW_RADIUS).min(pages);

    if end - start < WINDOW_SPAN - 1 {
        if start == 1 {
            end = start.saturating_add(WINDOW_SPAN - 1).min(pages);
        } else if end == pages {
            start = end.saturating_sub(WINDOW_SPAN - 1).max(1);
        }
    }
    (start, end)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
