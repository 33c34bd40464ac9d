//! Phone operations and the composite phone search.

use roxmltree::Node;
use tracing::debug;

use crate::axl::{fault_is_not_found, xml, AxlClient, AxlError};
use crate::models::{Phone, PhoneLine, PhoneSearch, PhoneSearchResult};

impl AxlClient {
    /// Fetch one phone with its line appearances. A not-found fault maps
    /// to `Ok(None)`.
    pub async fn get_phone(&self, name: &str) -> Result<Option<Phone>, AxlError> {
        let body = format!(
            "<ns:getPhone sequence=\"\"><name>{}</name></ns:getPhone>",
            xml::escape(name),
        );
        match self.call("getPhone", &body).await {
            Ok(text) => {
                let doc = xml::parse(&text)?;
                let node = xml::descendant(&doc, "phone").ok_or_else(|| {
                    AxlError::Parse("getPhone response missing phone element".into())
                })?;
                Ok(Some(parse_phone(node)))
            }
            Err(AxlError::Fault { ref message, .. }) if fault_is_not_found(message) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// List phones whose device name matches `pattern` (`%` wildcard),
    /// with summary tags only.
    pub async fn list_phones(&self, pattern: &str) -> Result<Vec<Phone>, AxlError> {
        let body = format!(
            concat!(
                "<ns:listPhone sequence=\"\">",
                "<searchCriteria><name>{}</name></searchCriteria>",
                "<returnedTags><name/><description/><ownerUserName/>",
                "<callingSearchSpaceName/></returnedTags>",
                "</ns:listPhone>"
            ),
            xml::escape(pattern),
        );
        let text = self.call("listPhone", &body).await?;
        let doc = xml::parse(&text)?;
        let mut phones = Vec::new();
        if let Some(ret) = xml::descendant(&doc, "return") {
            for node in xml::children(ret, "phone") {
                phones.push(parse_phone(node));
            }
        }
        Ok(phones)
    }

    /// Composite discovery over two independently triggered filters:
    ///
    /// 1. a line (pattern + partition) contributes the device names that
    ///    line appears on;
    /// 2. any of the description/owner/name substrings triggers an
    ///    unrestricted listing filtered client-side (case-insensitive,
    ///    all provided substrings must match).
    ///
    /// The union is deduplicated by phone name and expanded to full
    /// detail, capped by `criteria.limit`. When the cap cuts candidates
    /// the result says so via `truncated`.
    pub async fn search_phones(
        &self,
        criteria: &PhoneSearch,
    ) -> Result<PhoneSearchResult, AxlError> {
        let mut names: Vec<String> = Vec::new();

        if let Some(line) = &criteria.line {
            if let Some(found) = self.get_line(line).await? {
                for device in found.associated_devices {
                    if !names.contains(&device) {
                        names.push(device);
                    }
                }
            }
        }

        if criteria.description.is_some() || criteria.owner.is_some() || criteria.name.is_some()
        {
            for phone in self.list_phones("%").await? {
                if matches_filters(&phone, criteria) && !names.contains(&phone.name) {
                    names.push(phone.name);
                }
            }
        }

        let truncated = names.len() > criteria.limit;
        names.truncate(criteria.limit);
        debug!(candidates = names.len(), truncated, "expanding phone search matches");

        let mut phones = Vec::new();
        for name in &names {
            if let Some(phone) = self.get_phone(name).await? {
                phones.push(phone);
            }
        }
        Ok(PhoneSearchResult { phones, truncated })
    }
}

fn matches_filters(phone: &Phone, criteria: &PhoneSearch) -> bool {
    fn has(haystack: Option<&str>, needle: &str) -> bool {
        haystack
            .map(|haystack| haystack.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }
    if let Some(description) = &criteria.description {
        if !has(phone.description.as_deref(), description) {
            return false;
        }
    }
    if let Some(owner) = &criteria.owner {
        if !has(phone.owner_user_name.as_deref(), owner) {
            return false;
        }
    }
    if let Some(name) = &criteria.name {
        if !has(Some(&phone.name), name) {
            return false;
        }
    }
    true
}

fn parse_phone(node: Node) -> Phone {
    let lines = match xml::child(node, "lines") {
        Some(wrapper) => xml::children(wrapper, "line")
            .into_iter()
            .map(|line| {
                let dirn = xml::child(line, "dirn");
                PhoneLine {
                    index: xml::text_of(line, "index").and_then(|value| value.parse().ok()),
                    pattern: dirn
                        .and_then(|dirn| xml::text_of(dirn, "pattern"))
                        .unwrap_or_default(),
                    route_partition: dirn.and_then(|dirn| {
                        xml::scalar_or_nested(xml::child(dirn, "routePartitionName"))
                    }),
                    calling_search_space: xml::scalar_or_nested(xml::child(
                        line,
                        "callingSearchSpaceName",
                    )),
                }
            })
            .collect(),
        None => Vec::new(),
    };
    Phone {
        name: xml::text_of(node, "name").unwrap_or_default(),
        description: xml::text_of(node, "description").filter(|d| !d.is_empty()),
        owner_user_name: xml::scalar_or_nested(xml::child(node, "ownerUserName"))
            .filter(|owner| !owner.is_empty()),
        calling_search_space: xml::scalar_or_nested(xml::child(node, "callingSearchSpaceName")),
        lines,
    }
}
