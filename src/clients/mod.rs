pub mod musics;
pub mod ratings;

pub use musics::{HttpMusicCatalog, MusicCatalog};
pub use ratings::{RatingsClient, UpstreamBody, UpstreamResponse};
