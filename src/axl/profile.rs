//! Remote Destination Profile operations.

use roxmltree::Node;

use crate::axl::xml::push_tag;
use crate::axl::{xml, AxlClient, AxlError};
use crate::models::{NewRemoteDestinationProfile, RdpRow};

impl AxlClient {
    /// List profiles whose name matches `pattern` (`%` is the AXL
    /// wildcard). One row per (profile, line) pair; a profile with no
    /// lines still yields a single row with empty line fields so it is
    /// never absent from the listing.
    pub async fn list_remote_destination_profiles(
        &self,
        pattern: &str,
    ) -> Result<Vec<RdpRow>, AxlError> {
        let body = format!(
            concat!(
                "<ns:listRemoteDestinationProfile sequence=\"\">",
                "<searchCriteria><name>{}</name></searchCriteria>",
                "<returnedTags>",
                "<name/><description/><devicePoolName/>",
                "<callingSearchSpaceName/><rerouteCallingSearchSpaceName/>",
                "<lines><line><index/><dirn><pattern/><routePartitionName/></dirn></line></lines>",
                "</returnedTags>",
                "</ns:listRemoteDestinationProfile>"
            ),
            xml::escape(pattern),
        );
        let text = self.call("listRemoteDestinationProfile", &body).await?;
        let doc = xml::parse(&text)?;
        let mut rows = Vec::new();
        if let Some(ret) = xml::descendant(&doc, "return") {
            for profile in xml::children(ret, "remoteDestinationProfile") {
                rows.extend(parse_profile_rows(profile));
            }
        }
        Ok(rows)
    }

    /// Create a profile. The echoed identifier is deliberately ignored;
    /// callers that care about the result read live state back instead.
    pub async fn add_remote_destination_profile(
        &self,
        input: &NewRemoteDestinationProfile,
    ) -> Result<(), AxlError> {
        let mut body = String::from(
            "<ns:addRemoteDestinationProfile sequence=\"\"><remoteDestinationProfile>",
        );
        push_tag(&mut body, "name", &input.name);
        if let Some(description) = &input.description {
            push_tag(&mut body, "description", description);
        }
        // Fixed product/class/protocol triplet the schema requires for
        // this device type.
        push_tag(&mut body, "product", "Remote Destination Profile");
        push_tag(&mut body, "class", "Remote Destination Profile");
        push_tag(&mut body, "protocol", "Remote Destination");
        push_tag(&mut body, "protocolSide", "User");
        push_tag(&mut body, "devicePoolName", &input.device_pool);
        if let Some(css) = &input.calling_search_space {
            push_tag(&mut body, "callingSearchSpaceName", css);
        }
        if let Some(css) = &input.reroute_calling_search_space {
            push_tag(&mut body, "rerouteCallingSearchSpaceName", css);
        }
        push_tag(&mut body, "userId", &input.user_id);
        if let Some(assoc) = &input.line {
            body.push_str("<lines><line>");
            push_tag(&mut body, "index", &assoc.index.to_string());
            body.push_str("<dirn>");
            push_tag(&mut body, "pattern", &assoc.line.pattern);
            push_tag(&mut body, "routePartitionName", &assoc.line.route_partition);
            body.push_str("</dirn></line></lines>");
        }
        body.push_str("</remoteDestinationProfile></ns:addRemoteDestinationProfile>");

        self.call("addRemoteDestinationProfile", &body).await?;
        Ok(())
    }
}

fn parse_profile_rows(node: Node) -> Vec<RdpRow> {
    let base = RdpRow {
        name: xml::text_of(node, "name").unwrap_or_default(),
        description: xml::text_of(node, "description").filter(|d| !d.is_empty()),
        device_pool: xml::scalar_or_nested(xml::child(node, "devicePoolName")),
        calling_search_space: xml::scalar_or_nested(xml::child(node, "callingSearchSpaceName")),
        reroute_calling_search_space: xml::scalar_or_nested(xml::child(
            node,
            "rerouteCallingSearchSpaceName",
        )),
        line_index: None,
        line_pattern: None,
        line_partition: None,
    };

    let lines = match xml::child(node, "lines") {
        Some(wrapper) => xml::children(wrapper, "line"),
        None => Vec::new(),
    };
    if lines.is_empty() {
        return vec![base];
    }
    lines
        .into_iter()
        .map(|line| {
            let dirn = xml::child(line, "dirn");
            RdpRow {
                line_index: xml::text_of(line, "index").and_then(|value| value.parse().ok()),
                line_pattern: dirn.and_then(|dirn| xml::text_of(dirn, "pattern")),
                line_partition: dirn.and_then(|dirn| {
                    xml::scalar_or_nested(xml::child(dirn, "routePartitionName"))
                }),
                ..base.clone()
            }
        })
        .collect()
}
