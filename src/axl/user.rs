//! User resource operations.

use roxmltree::Node;

use crate::axl::{fault_is_not_found, xml, AxlClient, AxlError};
use crate::models::{EndUser, LineRef, MobilityUpdate};

impl AxlClient {
    /// Fetch a directory user. A not-found fault maps to `Ok(None)`.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<EndUser>, AxlError> {
        let body = format!(
            "<ns:getUser sequence=\"\"><userid>{}</userid></ns:getUser>",
            xml::escape(user_id),
        );
        match self.call("getUser", &body).await {
            Ok(text) => {
                let doc = xml::parse(&text)?;
                let user = xml::descendant(&doc, "user").ok_or_else(|| {
                    AxlError::Parse("getUser response missing user element".into())
                })?;
                Ok(Some(parse_user(user)))
            }
            Err(AxlError::Fault { ref message, .. }) if fault_is_not_found(message) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Write the Single Number Reach mobility settings on a user.
    pub async fn update_user_mobility(
        &self,
        user_id: &str,
        update: &MobilityUpdate,
    ) -> Result<(), AxlError> {
        let body = format!(
            concat!(
                "<ns:updateUser sequence=\"\">",
                "<userid>{}</userid>",
                "<enableMobility>{}</enableMobility>",
                "<maxDeskPickupWaitTime>{}</maxDeskPickupWaitTime>",
                "<remoteDestinationLimit>{}</remoteDestinationLimit>",
                "</ns:updateUser>"
            ),
            xml::escape(user_id),
            update.enable_mobility,
            update.max_desk_pickup_wait,
            update.remote_destination_limit,
        );
        self.call("updateUser", &body).await?;
        Ok(())
    }
}

fn parse_user(node: Node) -> EndUser {
    // Pattern and partition live under primaryExtension, never at the
    // top level of the user element.
    let primary_extension = xml::child(node, "primaryExtension").and_then(|ext| {
        Some(LineRef {
            pattern: xml::text_of(ext, "pattern")?,
            route_partition: xml::scalar_or_nested(xml::child(ext, "routePartitionName"))
                .unwrap_or_default(),
        })
    });

    // The association collection uses two child tag spellings depending
    // on server version; accept both in document order. An absent
    // collection is an empty list, not a failure.
    let mut profiles = Vec::new();
    if let Some(assoc) = xml::child(node, "associatedRemoteDestinationProfiles") {
        for item in assoc.children().filter(|item| item.is_element()) {
            let tag = item.tag_name().name();
            if tag == "remoteDestinationProfile" || tag == "remoteDestinationProfileName" {
                if let Some(name) = xml::scalar_or_nested(Some(item)) {
                    if !name.is_empty() {
                        profiles.push(name);
                    }
                }
            }
        }
    }

    EndUser {
        user_id: xml::text_of(node, "userid").unwrap_or_default(),
        enable_mobility: xml::flag(xml::text_of(node, "enableMobility")).unwrap_or(false),
        max_desk_pickup_wait: xml::text_of(node, "maxDeskPickupWaitTime")
            .and_then(|value| value.parse().ok()),
        remote_destination_limit: xml::text_of(node, "remoteDestinationLimit")
            .and_then(|value| value.parse().ok()),
        primary_extension,
        remote_destination_profiles: profiles,
    }
}
