mod canvas;
mod notice_bar;
mod table;
mod toolbar;

pub use canvas::canvas_panel;
pub use notice_bar::notice_panel;
pub use table::table_panel;
pub use toolbar::toolbar;
