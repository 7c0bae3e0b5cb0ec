//! Client-side listing logic: search, proximity, paging and the home feed.

pub mod feed;
pub mod filter;
pub mod geo;
pub mod paging;

pub use feed::{FeedViewer, HomeFeed, HomeFeedService};
pub use filter::{filter_jobs, filter_shops};
pub use geo::{haversine_km, rank_shops_by_distance, RankedShop};
pub use paging::{paginate, Page};
