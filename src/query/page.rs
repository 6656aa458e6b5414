//! Navigation projections: pagination and adjacent posts

use crate::content::{Adjacent, Paginated, PostMeta};

/// Slice one 1-based page out of `posts`.
///
/// Out of range pages clamp into `[1, total_pages]`; there is always at
/// least one (possibly empty) page. A `per_page` of zero is treated as one.
pub fn paginate(posts: &[PostMeta], page: usize, per_page: usize) -> Paginated {
    let per_page = per_page.max(1);
    let total = posts.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let items = posts.iter().skip(start).take(per_page).cloned().collect();

    Paginated {
        page,
        per_page,
        total,
        total_pages,
        items,
    }
}

/// Neighbours of `slug` in newest-first order.
///
/// `previous` is the older post (the next element), `next` the newer one
/// (the prior element). An unknown slug has neither.
pub fn adjacent(posts: &[PostMeta], slug: &str) -> Adjacent {
    let Some(index) = posts.iter().position(|p| p.slug == slug) else {
        return Adjacent::default();
    };

    Adjacent {
        previous: posts.get(index + 1).cloned(),
        next: index.checked_sub(1).and_then(|i| posts.get(i)).cloned(),
    }
}
