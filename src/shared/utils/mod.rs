// Utility functions
// Line framing and relay stream decoding

pub mod line_buffer;
pub mod stream_parser;

pub use line_buffer::LineBuffer;
pub use stream_parser::{ConsumerState, ConsumerUpdate, RelayConsumer};
