use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{ExportError, Result};

use super::{SamplePoint, SampleSink};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Writes samples as a KML 2.2 document of point placemarks.
///
/// Every sample needs geographic coordinates; assemble them with
/// [`super::AssembleSamples::execute_with`].
#[derive(Debug)]
pub struct KmlWriter<W: Write> {
    out: W,
    document_name: String,
}

impl<W: Write> KmlWriter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            document_name: "Road samples".to_owned(),
        }
    }

    /// Sets the `<Document><name>` value.
    #[must_use]
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SampleSink for KmlWriter<W> {
    fn accept(&mut self, samples: &[SamplePoint]) -> Result<()> {
        // Check up front so a failure leaves no partial document behind.
        if let Some(missing) = samples.iter().find(|s| s.geographic.is_none()) {
            return Err(ExportError::MissingGeographic {
                index: missing.index,
            }
            .into());
        }

        let mut writer = Writer::new_with_indent(&mut self.out, b' ', 2);
        write_document(&mut writer, &self.document_name, samples).map_err(ExportError::from)?;
        self.out.flush().map_err(ExportError::from)?;
        Ok(())
    }
}

fn write_document<W: Write>(
    writer: &mut Writer<W>,
    document_name: &str,
    samples: &[SamplePoint],
) -> quick_xml::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    writer.write_event(Event::Start(kml))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    write_text_element(writer, "name", document_name)?;

    for sample in samples {
        let Some(geo) = sample.geographic else {
            continue;
        };
        writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
        write_text_element(writer, "name", &sample.kml_name())?;
        write_text_element(writer, "description", &sample.kml_description())?;
        writer.write_event(Event::Start(BytesStart::new("Point")))?;
        write_text_element(
            writer,
            "coordinates",
            &format!("{},{}", geo.longitude, geo.latitude),
        )?;
        writer.write_event(Event::End(BytesEnd::new("Point")))?;
        writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
