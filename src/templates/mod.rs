//! HTML templates and styling for the group manager.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - escaping, page shell, registration error page
//! - `landing` - the widget page with its client script
//! - `groups` - rendering of group search results

mod components;
mod groups;
mod landing;
mod styles;

pub use components::{base_html, html_escape, registration_error_page};
pub use groups::{
    render_error, render_group, render_groups, render_groups_payload, EMPTY_HTML, LOADING_HTML,
};
pub use landing::{render_landing, WidgetSettings};
pub use styles::STYLE;
