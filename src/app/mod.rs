// Server-rendered page: markup, styles, and the browser script

pub mod page;
pub mod script;
pub mod styles;

pub use page::{PageView, Tab, escape_html, render_page};
