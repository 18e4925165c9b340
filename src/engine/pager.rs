use std::{future::Future, marker::PhantomData};

use crate::{errors::Result, types::Page};

/// Walks an offset-paged listing one page at a time.
///
/// `fetch` is called with `(limit, offset)` and must return the page at that
/// offset. Paging stops once the reported total is reached or a page comes
/// back empty. [`Pager::restart`] rewinds to the first page.
pub struct Pager<T, F> {
    fetch: F,
    limit: u32,
    offset: u32,
    exhausted: bool,
    _item: PhantomData<fn() -> T>,
}

impl<T, F, Fut> Pager<T, F>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    pub fn new(limit: u32, fetch: F) -> Self {
        Self {
            fetch,
            limit: limit.max(1),
            offset: 0,
            exhausted: false,
            _item: PhantomData,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = (self.fetch)(self.limit, self.offset).await?;
        self.offset += page.items.len() as u32;
        if page.items.is_empty() || self.offset >= page.total {
            self.exhausted = true;
        }

        if page.items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(page.items))
        }
    }

    pub fn restart(&mut self) {
        self.offset = 0;
        self.exhausted = false;
    }

    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(items) = self.next_page().await? {
            all.extend(items);
        }
        Ok(all)
    }
}
