//! YouTube video metadata for a batch of ids.
//!
//! The Data API drops ids it cannot resolve (deleted, private, malformed)
//! without saying which ones. [`VideoMetadata`] re-aligns the response with
//! the request so position `i` always belongs to the `i`-th requested id,
//! holding no record where the API returned nothing.
//!
//! ```no_run
//! use video_metadata::{FetchOptions, VideoMetadata};
//!
//! # async fn run() -> Result<(), video_metadata::MetadataError> {
//! let meta = VideoMetadata::fetch(
//!     FetchOptions::new()
//!         .video_ids(["dQw4w9WgXcQ", "deleted0000"])
//!         .dev_key("AIza..."),
//! )
//! .await?;
//!
//! for video in &meta {
//!     if video.is_available() {
//!         println!("{}: {}", video.id()?, video.title()?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod metadata;
pub mod reconcile;
pub mod record;
pub mod youtube;

pub use category::category_name;
pub use config::Config;
pub use error::MetadataError;
pub use metadata::{Entry, FetchOptions, VideoMetadata};
pub use reconcile::{reconcile, Batch};
pub use record::{Snippet, VideoListResponse, VideoRecord};
pub use youtube::videos::{VideoSource, YouTubeClient};
pub use youtube::{Credentials, YouTubeApiError};
