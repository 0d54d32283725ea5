#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod data_url;
pub mod error;
pub mod export;
mod geometry;
pub mod history;
pub mod host;
pub mod input;
pub mod notice;
pub mod options;
pub mod pad;
mod panels;
pub mod raster;
pub mod stroke;
pub mod style;
pub mod svg;
pub mod texture;
mod util;
pub mod widget;

pub use app::SignatureApp;
pub use error::{ExportError, HostError, InsertError};
pub use export::{ExportFormat, ExportedFile};
pub use history::StrokeHistory;
pub use host::{HostBridge, MemoryHost, insert_signature};
pub use notice::{Notice, NoticeBoard, NoticeLevel, NoticeSink};
pub use options::PadOptions;
pub use pad::SignaturePad;
pub use raster::PixelBuffer;
pub use stroke::{Stroke, StrokeBuilder, StrokePoint};
pub use style::Style;
pub use widget::SignatureWidget;
