pub mod bridge;
pub mod delegate;
pub mod encoder;
pub mod media_host;
pub mod playback;
