pub use self::charset::Charset;
pub use self::encoding::Encoding;
pub use self::media_range::MediaRange;
pub use self::quality_item::{q, qitem, Quality, QualityItem};

mod charset;
mod encoding;
mod media_range;
mod quality_item;

pub(crate) use self::charset::ISO_8859_1;
