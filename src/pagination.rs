const WINDOW_RADIUS: i64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    Previous { page: u32 },
    Page { page: u32, active: bool },
    Ellipsis,
    Next { page: u32 },
}

impl PageControl {
    pub fn target(&self) -> Option<u32> {
        match *self {
            Self::Previous { page } | Self::Page { page, .. } | Self::Next { page } => Some(page),
            Self::Ellipsis => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Page { active: true, .. })
    }

    pub fn label(&self) -> String {
        match self {
            Self::Previous { .. } => "Previous".to_string(),
            Self::Page { page, .. } => page.to_string(),
            Self::Ellipsis => "...".to_string(),
            Self::Next { .. } => "Next".to_string(),
        }
    }
}

pub fn page_controls(current_page: u32, total_pages: u32) -> Vec<PageControl> {
    let mut controls = Vec::new();
    if current_page < 1 {
        return controls;
    }

    let current = i64::from(current_page);
    let total = i64::from(total_pages);

    if current > total {
        controls.push(PageControl::Page {
            page: 1,
            active: false,
        });
        if total_pages != 2 {
            controls.push(PageControl::Ellipsis);
            controls.push(PageControl::Page {
                page: total_pages,
                active: false,
            });
        }
        return controls;
    }

    if current > 1 {
        controls.push(PageControl::Previous {
            page: current_page - 1,
        });
    }

    controls.push(PageControl::Page {
        page: 1,
        active: current_page == 1,
    });

    if current - WINDOW_RADIUS > 1 {
        controls.push(PageControl::Ellipsis);
    }

    let window_start = (current - WINDOW_RADIUS).max(2);
    let window_end = (current + WINDOW_RADIUS).min(total - 1);
    for page in window_start..=window_end {
        let page = page as u32;
        controls.push(PageControl::Page {
            page,
            active: page == current_page,
        });
    }

    if current + WINDOW_RADIUS <= total - 1 {
        controls.push(PageControl::Ellipsis);
    }

    if total_pages > 1 {
        controls.push(PageControl::Page {
            page: total_pages,
            active: current_page == total_pages,
        });
    }

    if current_page < total_pages {
        controls.push(PageControl::Next {
            page: current_page + 1,
        });
    }

    controls
}
