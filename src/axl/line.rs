//! Directory number (line) operations. Lines are read-only here except
//! for apply/reset, which push pending configuration to devices.

use crate::axl::{fault_is_not_found, xml, AxlClient, AxlError};
use crate::models::{Line, LineRef};

impl AxlClient {
    /// Fetch a directory number with the device names it appears on.
    /// A not-found fault maps to `Ok(None)`.
    pub async fn get_line(&self, line: &LineRef) -> Result<Option<Line>, AxlError> {
        let body = format!(
            concat!(
                "<ns:getLine sequence=\"\">",
                "<pattern>{}</pattern>",
                "<routePartitionName>{}</routePartitionName>",
                "</ns:getLine>"
            ),
            xml::escape(&line.pattern),
            xml::escape(&line.route_partition),
        );
        match self.call("getLine", &body).await {
            Ok(text) => {
                let doc = xml::parse(&text)?;
                let node = xml::descendant(&doc, "line").ok_or_else(|| {
                    AxlError::Parse("getLine response missing line element".into())
                })?;
                let associated_devices = match xml::child(node, "associatedDevices") {
                    Some(wrapper) => xml::children(wrapper, "device")
                        .into_iter()
                        .filter_map(|device| xml::text(Some(device)))
                        .filter(|name| !name.is_empty())
                        .collect(),
                    None => Vec::new(),
                };
                Ok(Some(Line {
                    pattern: xml::text_of(node, "pattern").unwrap_or_default(),
                    route_partition: xml::scalar_or_nested(xml::child(
                        node,
                        "routePartitionName",
                    )),
                    description: xml::text_of(node, "description")
                        .filter(|description| !description.is_empty()),
                    calling_search_space: xml::scalar_or_nested(xml::child(
                        node,
                        "callingSearchSpaceName",
                    )),
                    associated_devices,
                }))
            }
            Err(AxlError::Fault { ref message, .. }) if fault_is_not_found(message) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Push pending configuration for a line. A directory-number change
    /// may not take effect until this runs.
    pub async fn apply_line(&self, line: &LineRef) -> Result<(), AxlError> {
        let body = format!(
            concat!(
                "<ns:applyLine sequence=\"\">",
                "<pattern>{}</pattern>",
                "<routePartitionName>{}</routePartitionName>",
                "</ns:applyLine>"
            ),
            xml::escape(&line.pattern),
            xml::escape(&line.route_partition),
        );
        self.call("applyLine", &body).await?;
        Ok(())
    }

    /// Restart every device carrying the line.
    pub async fn reset_line(&self, line: &LineRef) -> Result<(), AxlError> {
        let body = format!(
            concat!(
                "<ns:resetLine sequence=\"\">",
                "<pattern>{}</pattern>",
                "<routePartitionName>{}</routePartitionName>",
                "</ns:resetLine>"
            ),
            xml::escape(&line.pattern),
            xml::escape(&line.route_partition),
        );
        self.call("resetLine", &body).await?;
        Ok(())
    }
}
