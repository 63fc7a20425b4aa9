// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(6).expect("six is non-zero");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Slices out 1-based page `page`. Out-of-range pages, including `0`, yield
/// an empty slice; nothing is clamped here.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let size = page_size.get();
    let slice = match page.checked_sub(1).and_then(|index| index.checked_mul(size)) {
        Some(start) if start < items.len() => &items[start..items.len().min(start + size)],
        _ => &items[..0],
    };
    Page {
        items: slice,
        total_pages,
    }
}

/// Current page of one list, with bounded navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Returns whether the page moved.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.page >= total_pages {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pulls the page back into `1..=total_pages` after the list shrank.
    pub fn clamp(&mut self, total_pages: usize) {
        self.page = self.page.min(total_pages).max(1);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page_size, self.page)
    }
}
