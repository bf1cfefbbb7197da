//! ILSVRC2015 VID glue around `sequence_common`: annotation parsing, per-folder
//! track extraction and record output.

pub mod annotation;
pub mod folder;
pub mod record;

pub use annotation::{parse_xml, parse_xml_str, AnnoMeta, AnnoObj, BndBox};
pub use folder::{read_annotation_folder, window_folder, FolderTracks, FolderWindows};
pub use record::{JsonLinesSink, RecordSink, SequenceRecord};
