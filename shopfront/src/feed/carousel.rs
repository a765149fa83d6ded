use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// How long each banner stays before the carousel advances.
pub const BANNER_INTERVAL_MS: u64 = 10_000;

const DEFAULT_BANNER_IMAGES: [&str; 5] = [
    "https://t4.ftcdn.net/jpg/03/06/69/49/360_F_306694930_S3Z8H9Qk1MN79ZUe7bEWqTFuonRZdemw.jpg",
    "https://static.vecteezy.com/system/resources/previews/011/640/737/non_2x/shopping-day-sale-banner-template-design-for-web-or-social-media-vector.jpg",
    "https://img.freepik.com/premium-vector/social-media-super-sale-banner-design-super-sale-facebook-cover-template_471203-1343.jpg?semt=ais_hybrid",
    "https://cdn.vectorstock.com/i/1000v/09/80/online-shopping-banner-vector-17230980.jpg",
    "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRAZe3aX7YNYcANgO1NoH8E7Wfw2OmtZfxcPQ&s",
];

/// A promotional banner on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Banner {
    /// Position-independent id, starting at 1
    pub id: u32,
    /// Image URL
    pub image_url: String,
}

/// Rotating banner strip. The host owns the timer and calls [`advance`](Self::advance)
/// every [`interval_ms`](Self::interval_ms).
#[derive(uniffi::Object)]
pub struct BannerCarousel {
    banners: Vec<Banner>,
    index: AtomicUsize,
}

#[crate::shopfront_export]
impl BannerCarousel {
    /// The built-in promotional banners.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        let banners = (1..)
            .zip(DEFAULT_BANNER_IMAGES)
            .map(|(id, image_url)| Banner {
                id,
                image_url: image_url.to_string(),
            })
            .collect();
        Self::with_banners(banners)
    }

    /// A carousel over `banners`, starting at the first one.
    #[uniffi::constructor]
    pub fn with_banners(banners: Vec<Banner>) -> Arc<Self> {
        Arc::new(Self {
            banners,
            index: AtomicUsize::new(0),
        })
    }

    /// All banners in order.
    #[must_use]
    pub fn banners(&self) -> Vec<Banner> {
        self.banners.clone()
    }

    /// Index of the banner on screen.
    #[must_use]
    pub fn current_index(&self) -> u32 {
        u32::try_from(self.index.load(Ordering::Acquire)).unwrap_or(u32::MAX)
    }

    /// The banner on screen, `None` when there are no banners.
    #[must_use]
    pub fn current(&self) -> Option<Banner> {
        self.banners.get(self.index.load(Ordering::Acquire)).cloned()
    }

    /// Moves to the next banner, wrapping after the last, and returns it.
    pub fn advance(&self) -> Option<Banner> {
        let len = self.banners.len();
        if len == 0 {
            return None;
        }

        let previous = self
            .index
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % len))
            .unwrap_or_else(|i| i);
        let next = (previous + 1) % len;
        crate::trace!("carousel.advanced index={next}");
        self.banners.get(next).cloned()
    }

    /// Jumps to `index` after the user swiped. Out-of-range indices wrap.
    pub fn show(&self, index: u32) -> Option<Banner> {
        let len = self.banners.len();
        if len == 0 {
            return None;
        }

        let index = usize::try_from(index).unwrap_or(usize::MAX) % len;
        self.index.store(index, Ordering::Release);
        self.banners.get(index).cloned()
    }

    /// Auto-advance interval in milliseconds.
    #[must_use]
    #[allow(clippy::unused_self)] // uniffi has no associated functions
    pub fn interval_ms(&self) -> u64 {
        BANNER_INTERVAL_MS
    }
}
