//! Remote Destination operations.

use roxmltree::Node;

use crate::axl::xml::push_tag;
use crate::axl::{xml, AxlClient, AxlError};
use crate::models::{NewRemoteDestination, RemoteDestination};

impl AxlClient {
    /// List remote destinations owned by any of the named profiles.
    ///
    /// The server-side owner filter is unreliable on the target version:
    /// a filtered search silently misses rows. Listing therefore always
    /// sends the unrestricted wildcard and filters by owning profile
    /// here, client-side.
    pub async fn list_remote_destinations(
        &self,
        profiles: &[String],
    ) -> Result<Vec<RemoteDestination>, AxlError> {
        let body = concat!(
            "<ns:listRemoteDestination sequence=\"\">",
            "<searchCriteria><destination>%</destination></searchCriteria>",
            "<returnedTags><name/><destination/><remoteDestinationProfileName/></returnedTags>",
            "</ns:listRemoteDestination>"
        );
        let text = self.call("listRemoteDestination", body).await?;
        let doc = xml::parse(&text)?;
        let mut destinations = Vec::new();
        if let Some(ret) = xml::descendant(&doc, "return") {
            for node in xml::children(ret, "remoteDestination") {
                let destination = parse_destination(node);
                let owned = destination
                    .profile
                    .as_deref()
                    .map(|owner| profiles.iter().any(|name| name == owner))
                    .unwrap_or(false);
                if owned {
                    destinations.push(destination);
                }
            }
        }
        Ok(destinations)
    }

    /// Create a remote destination under its profile. Echoed identifiers
    /// are ignored; read-back is the authority on what took effect.
    pub async fn add_remote_destination(
        &self,
        input: &NewRemoteDestination,
    ) -> Result<(), AxlError> {
        let mut body =
            String::from("<ns:addRemoteDestination sequence=\"\"><remoteDestination>");
        push_tag(&mut body, "name", &input.name);
        push_tag(&mut body, "destination", &input.destination);
        push_tag(&mut body, "answerTooSoonTimer", &input.answer_too_soon_timer.to_string());
        push_tag(&mut body, "answerTooLateTimer", &input.answer_too_late_timer.to_string());
        push_tag(&mut body, "delayBeforeRingingCell", &input.delay_before_ringing.to_string());
        push_tag(&mut body, "remoteDestinationProfileName", &input.profile);
        if let Some(css) = &input.mobility_calling_search_space {
            push_tag(&mut body, "callingSearchSpaceName", css);
        }
        push_tag(&mut body, "isMobilePhone", &input.is_mobile_phone.to_string());
        push_tag(
            &mut body,
            "enableUnifiedMobility",
            &input.enable_unified_mobility.to_string(),
        );
        push_tag(
            &mut body,
            "enableMobileConnect",
            &input.enable_mobile_connect.to_string(),
        );
        if let Some(line) = &input.line {
            body.push_str("<lineAssociations><lineAssociation>");
            push_tag(&mut body, "pattern", &line.pattern);
            push_tag(&mut body, "routePartitionName", &line.route_partition);
            body.push_str("</lineAssociation></lineAssociations>");
        }
        body.push_str("</remoteDestination></ns:addRemoteDestination>");

        self.call("addRemoteDestination", &body).await?;
        Ok(())
    }
}

fn parse_destination(node: Node) -> RemoteDestination {
    RemoteDestination {
        name: xml::text_of(node, "name").filter(|name| !name.is_empty()),
        destination: xml::text_of(node, "destination").unwrap_or_default(),
        profile: xml::scalar_or_nested(xml::child(node, "remoteDestinationProfileName"))
            .filter(|profile| !profile.is_empty()),
    }
}
