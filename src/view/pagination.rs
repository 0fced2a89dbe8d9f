/// One entry of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub active: bool,
}

impl PageLink {
    /// Hands the requested page to the list that owns the selector.
    pub fn select<R>(&self, on_page_change: impl FnOnce(u32) -> R) -> R {
        on_page_change(self.number)
    }
}

/// One link per page, `1..=page_count`, with `page` marked active.
///
/// No clamping happens here: a `page` outside the range simply leaves every
/// link inactive.
pub fn page_links(page: u32, page_count: u32) -> Vec<PageLink> {
    (1..=page_count)
        .map(|number| PageLink { number, active: number == page })
        .collect()
}

/// `1 [2] 3` with the active page bracketed.
pub fn render_page_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.number)
            } else {
                link.number.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_link_per_page() {
        let links = page_links(2, 4);
        assert_eq!(links.len(), 4);
        assert_eq!(links.iter().filter(|l| l.active).count(), 1);
        assert!(links[1].active);
        assert_eq!(links[3].number, 4);
    }

    #[test]
    fn out_of_range_page_is_not_clamped() {
        let links = page_links(9, 3);
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| !l.active));
        assert!(page_links(1, 0).is_empty());
    }

    #[test]
    fn selecting_reports_page_number() {
        let links = page_links(1, 3);
        let mut requested = None;
        links[2].select(|page| requested = Some(page));
        assert_eq!(requested, Some(3));
    }

    #[test]
    fn renders_active_page() {
        assert_eq!(render_page_links(&page_links(2, 3)), "1 [2] 3");
    }
}
