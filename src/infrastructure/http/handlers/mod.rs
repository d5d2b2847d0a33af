//! HTTP Handlers

mod clip;
mod ping;
mod session;
mod voice;
mod websocket;
mod word_list;
mod words;

pub use clip::*;
pub use ping::*;
pub use session::*;
pub use voice::*;
pub use websocket::*;
pub use word_list::*;
pub use words::*;
