pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let page_count = (items.len() as u32).div_ceil(page_size);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Pages outside `1..=page_count` fall back to the first one.
    pub fn clamp_page(&self, page: u32) -> u32 {
        match page {
            0 => 1,
            x if x > self.page_count => 1,
            x => x,
        }
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let items: &'a [T] = self.items;
        let start = ((page - 1) * self.page_size) as usize;
        let end = (start + self.page_size as usize).min(items.len());
        Ok(&items[start..end])
    }

    /// Like [`Paginator::get_page`], after clamping. An empty list gives an empty page.
    pub fn page_or_first(&self, page: u32) -> (u32, &'a [T]) {
        let page = self.clamp_page(page);
        (page, self.get_page(page).unwrap_or(&[]))
    }
}
