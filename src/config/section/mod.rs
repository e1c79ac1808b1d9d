//! Configuration sections.
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[pandoc]`       | Converter binary, arguments, defaults files    |
//! | `[reading_time]` | Reading time estimation                        |

mod pandoc;
mod reading_time;

pub use pandoc::{Extensions, PandocConfig};
pub use reading_time::{DEFAULT_WORDS_PER_MINUTE, ReadingTimeConfig, WordsPerMinute};
