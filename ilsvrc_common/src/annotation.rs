//! ILSVRC2015 VID annotation files.
//!
//! One `NNNNNN.xml` file describes one frame of a video snippet:
//!
//! ```xml
//! <annotation>
//!   <folder>ILSVRC2015_val_00030000</folder>
//!   <filename>000000</filename>
//!   <source><database>ILSVRC_2015</database></source>
//!   <size><width>1280</width><height>720</height></size>
//!   <object>
//!     <trackid>0</trackid>
//!     <name>n02510455</name>
//!     <bndbox><xmax>855</xmax><xmin>449</xmin><ymax>682</ymax><ymin>304</ymin></bndbox>
//!     <occluded>1</occluded>
//!     <generated>0</generated>
//!   </object>
//! </annotation>
//! ```

use std::path::Path;

use anyhow::{bail, Context};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

const ROOT_TAG: &str = "annotation";

/// Header of an annotation file; identical across the frames of one sequence
/// except for `filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnoMeta {
    /// Folder of the sequence, relative to the annotation root.
    pub folder: String,
    /// Six-digit frame number.
    pub filename: String,
    /// `(width, height)` of the frame.
    pub size: (u32, u32),
}

/// Bounding box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BndBox {
    pub xmax: i64,
    pub xmin: i64,
    pub ymax: i64,
    pub ymin: i64,
}

impl BndBox {
    /// The box in file order, `[xmax, xmin, ymax, ymin]`.
    pub fn to_array(&self) -> [i64; 4] {
        [self.xmax, self.xmin, self.ymax, self.ymin]
    }
}

/// One annotated object in one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnoObj {
    /// Identifies the object across frames of the same sequence.
    pub trackid: String,
    /// Frame number, shared with [`AnnoMeta::filename`].
    pub filename: String,
    /// Synset id of the object class.
    pub name: String,
    pub bndbox: BndBox,
    pub occluded: i64,
    pub generated: i64,
}

#[derive(Debug, Deserialize)]
struct AnnotationXml {
    folder: String,
    filename: String,
    size: SizeXml,
    #[serde(rename = "object", default)]
    objects: Vec<ObjectXml>,
}

#[derive(Debug, Deserialize)]
struct SizeXml {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct ObjectXml {
    trackid: String,
    name: String,
    bndbox: BndBox,
    occluded: i64,
    generated: i64,
}

fn root_tag(xml: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned())
            }
            Event::Eof => bail!("document has no root element"),
            _ => (),
        }
    }
}

/// Parses the contents of one annotation file.
pub fn parse_xml_str(xml: &str) -> anyhow::Result<(AnnoMeta, Vec<AnnoObj>)> {
    let root = root_tag(xml)?;
    if root != ROOT_TAG {
        bail!("root element is not tagged with `{ROOT_TAG}`, got `{root}`");
    }
    let doc: AnnotationXml =
        quick_xml::de::from_str(xml).context("Failed to parse annotation xml")?;

    let meta = AnnoMeta {
        folder: doc.folder,
        filename: doc.filename,
        size: (doc.size.width, doc.size.height),
    };
    let objs = doc
        .objects
        .into_iter()
        .map(|o| AnnoObj {
            trackid: o.trackid,
            filename: meta.filename.clone(),
            name: o.name,
            bndbox: o.bndbox,
            occluded: o.occluded,
            generated: o.generated,
        })
        .collect();
    Ok((meta, objs))
}

/// Reads and parses one annotation file.
pub fn parse_xml(path: &Path) -> anyhow::Result<(AnnoMeta, Vec<AnnoObj>)> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read annotation file {path:?}"))?;
    parse_xml_str(&xml).with_context(|| format!("Invalid annotation file {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<annotation>
  <folder>ILSVRC2015_val_00030000</folder>
  <filename>000000</filename>
  <source>
    <database>ILSVRC_2015</database>
  </source>
  <size>
    <width>1280</width>
    <height>720</height>
  </size>
  <object>
    <trackid>0</trackid>
    <name>n02510455</name>
    <bndbox>
      <xmax>855</xmax>
      <xmin>449</xmin>
      <ymax>682</ymax>
      <ymin>304</ymin>
    </bndbox>
    <occluded>1</occluded>
    <generated>0</generated>
  </object>
  <object>
    <trackid>1</trackid>
    <name>n02510455</name>
    <bndbox>
      <xmax>931</xmax>
      <xmin>172</xmin>
      <ymax>590</ymax>
      <ymin>307</ymin>
    </bndbox>
    <occluded>1</occluded>
    <generated>0</generated>
  </object>
</annotation>
"#;

    #[test]
    fn test_parse_sample() {
        let (meta, objs) = parse_xml_str(SAMPLE).unwrap();
        assert_eq!(meta.folder, "ILSVRC2015_val_00030000");
        assert_eq!(meta.filename, "000000");
        assert_eq!(meta.size, (1280, 720));

        assert_eq!(objs.len(), 2);
        assert_eq!(objs[0].trackid, "0");
        assert_eq!(objs[1].trackid, "1");
        assert_eq!(objs[0].name, "n02510455");
        assert_eq!(objs[0].bndbox.to_array(), [855, 449, 682, 304]);
        assert_eq!(objs[1].bndbox.to_array(), [931, 172, 590, 307]);
        assert_eq!(objs[0].occluded, 1);
        assert_eq!(objs[0].generated, 0);
        assert!(objs.iter().all(|o| o.filename == "000000"));
    }

    #[test]
    fn test_parse_frame_without_objects() {
        let xml = "<annotation><folder>f</folder><filename>000003</filename>\
                   <size><width>10</width><height>20</height></size></annotation>";
        let (meta, objs) = parse_xml_str(xml).unwrap();
        assert_eq!(meta.size, (10, 20));
        assert!(objs.is_empty());
    }

    #[test]
    fn test_rejects_wrong_root() {
        let xml = "<object><trackid>0</trackid></object>";
        let err = parse_xml_str(xml).unwrap_err();
        assert!(err.to_string().contains("got `object`"), "{err}");
    }

    #[test]
    fn test_rejects_object_without_flags() {
        let xml = "<annotation><folder>f</folder><filename>000000</filename>\
                   <size><width>10</width><height>20</height></size>\
                   <object><trackid>0</trackid><name>n02510455</name>\
                   <bndbox><xmax>4</xmax><xmin>1</xmin><ymax>5</ymax><ymin>2</ymin></bndbox>\
                   <occluded>1</occluded></object></annotation>";
        let err = parse_xml_str(xml).unwrap_err();
        assert!(format!("{err:#}").contains("generated"), "{err:#}");
    }

    #[test]
    fn test_rejects_missing_size() {
        let xml = "<annotation><folder>f</folder><filename>000000</filename></annotation>";
        assert!(parse_xml_str(xml).is_err());
    }
}
