pub mod charts;
pub mod figures;
pub mod fmt;
pub mod frame;
pub mod html;
pub mod scale;
pub mod summary_txt;
pub mod zip;
