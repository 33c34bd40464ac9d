use mockito::{Matcher, Server, ServerGuard};
use reach::axl::{AxlClient, AxlConfig};
use reach::models::LineRef;
use reach::provision::{
    provision, rd_name, rdp_name, verify, ProvisionRequest, ProvisionState, ProvisionStep,
};

fn client_for(server: &ServerGuard) -> AxlClient {
    let config = AxlConfig::new("cucm.example.com", "axladmin", "secret", "12.5")
        .endpoint(server.url());
    AxlClient::new(config).expect("client should build")
}

fn soap(inner: &str) -> String {
    format!(
        "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:ns=\"http://www.cisco.com/AXL/API/12.5\">\
         <soapenv:Body>{inner}</soapenv:Body></soapenv:Envelope>"
    )
}

fn ok_response(operation: &str) -> String {
    soap(&format!(
        "<ns:{operation}Response><return>ok</return></ns:{operation}Response>"
    ))
}

fn duplicate_fault() -> String {
    soap(
        "<soapenv:Fault><faultcode>soapenv:Client</faultcode>\
         <faultstring>Could not insert new row - duplicate value in a UNIQUE INDEX column</faultstring>\
         <detail><axlError><axlcode>4052</axlcode>\
         <axlmessage>Could not insert new row - duplicate value in a UNIQUE INDEX column (Unique Index:pkid)</axlmessage>\
         </axlError></detail></soapenv:Fault>",
    )
}

fn user_response(with_profiles: bool) -> String {
    let profiles = if with_profiles {
        "<associatedRemoteDestinationProfiles>\
         <remoteDestinationProfile>RDP_Teams_testuser</remoteDestinationProfile>\
         </associatedRemoteDestinationProfiles>"
    } else {
        ""
    };
    soap(&format!(
        "<ns:getUserResponse><return><user>\
         <userid>testuser</userid>\
         <enableMobility>true</enableMobility>\
         <maxDeskPickupWaitTime>10000</maxDeskPickupWaitTime>\
         <remoteDestinationLimit>4</remoteDestinationLimit>\
         <primaryExtension><pattern>2463</pattern>\
         <routePartitionName>ExtensionsPart</routePartitionName></primaryExtension>\
         {profiles}\
         </user></return></ns:getUserResponse>",
    ))
}

fn profile_listing() -> String {
    soap(
        "<ns:listRemoteDestinationProfileResponse><return>\
         <remoteDestinationProfile>\
         <name>RDP_Teams_testuser</name>\
         <devicePoolName>Default</devicePoolName>\
         <lines><line><index>1</index><dirn><pattern>2463</pattern>\
         <routePartitionName>ExtensionsPart</routePartitionName></dirn></line></lines>\
         </remoteDestinationProfile>\
         </return></ns:listRemoteDestinationProfileResponse>",
    )
}

fn destination_listing() -> String {
    // Includes an unrelated destination the owner filter must exclude.
    soap(
        "<ns:listRemoteDestinationResponse><return>\
         <remoteDestination><name>RD_testuser_test</name>\
         <destination>11235812463</destination>\
         <remoteDestinationProfileName>RDP_Teams_testuser</remoteDestinationProfileName>\
         </remoteDestination>\
         <remoteDestination><name>RD_stranger</name>\
         <destination>15550001111</destination>\
         <remoteDestinationProfileName>RDP_Teams_stranger</remoteDestinationProfileName>\
         </remoteDestination>\
         </return></ns:listRemoteDestinationResponse>",
    )
}

fn request() -> ProvisionRequest {
    ProvisionRequest::new(
        "testuser",
        "11235812463",
        LineRef::new("2463", "ExtensionsPart"),
        "Default",
    )
}

async fn mock_read_back(server: &mut ServerGuard, with_profiles: bool) {
    server
        .mock("POST", "/")
        .match_body(Matcher::Regex("ns:getUser".to_string()))
        .with_body(user_response(with_profiles))
        .create_async()
        .await;
    server
        .mock("POST", "/")
        .match_body(Matcher::Regex("listRemoteDestinationProfile".to_string()))
        .with_body(profile_listing())
        .create_async()
        .await;
    server
        .mock("POST", "/")
        .match_body(Matcher::Regex("<ns:listRemoteDestination sequence".to_string()))
        .with_body(destination_listing())
        .create_async()
        .await;
}

mod provisioning {
    use super::*;

    #[tokio::test]
    async fn end_to_end_applies_all_steps_and_reads_back_live_state() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:updateUser".to_string()))
            .with_body(ok_response("updateUser"))
            .create_async()
            .await;
        let add_profile = server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("ns:addRemoteDestinationProfile".to_string()),
                Matcher::Regex("<name>RDP_Teams_testuser</name>".to_string()),
                Matcher::Regex("<pattern>2463</pattern>".to_string()),
            ]))
            .with_body(ok_response("addRemoteDestinationProfile"))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:applyLine".to_string()))
            .with_body(ok_response("applyLine"))
            .create_async()
            .await;
        let add_destination = server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("<ns:addRemoteDestination sequence".to_string()),
                Matcher::Regex("<name>RD_testuser_test</name>".to_string()),
                Matcher::Regex("<destination>11235812463</destination>".to_string()),
                Matcher::Regex(
                    "<remoteDestinationProfileName>RDP_Teams_testuser</remoteDestinationProfileName>"
                        .to_string(),
                ),
            ]))
            .with_body(ok_response("addRemoteDestination"))
            .create_async()
            .await;
        mock_read_back(&mut server, true).await;

        let report = provision(&client_for(&server), &request()).await;

        add_profile.assert_async().await;
        add_destination.assert_async().await;

        assert!(report.fully_applied());
        assert_eq!(report.state, ProvisionState::Verified);

        let snapshot = report.snapshot.expect("snapshot should be present");
        let user = snapshot.user.expect("user should be present");
        assert!(user.enable_mobility);
        assert!(snapshot
            .profiles
            .iter()
            .any(|row| row.name == rdp_name("testuser")));
        assert!(snapshot
            .destinations
            .iter()
            .any(|rd| rd.name.as_deref() == Some(rd_name("testuser").as_str())
                && rd.destination == "11235812463"));
        // the stranger's destination was filtered out client-side
        assert!(!snapshot
            .destinations
            .iter()
            .any(|rd| rd.destination == "15550001111"));
    }

    #[tokio::test]
    async fn apply_line_failure_is_reported_without_gating_success() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:updateUser".to_string()))
            .with_body(ok_response("updateUser"))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:addRemoteDestinationProfile".to_string()))
            .with_body(ok_response("addRemoteDestinationProfile"))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:applyLine".to_string()))
            .with_status(500)
            .with_body(soap(
                "<soapenv:Fault><faultcode>soapenv:Server</faultcode>\
                 <faultstring>Device apply failed</faultstring></soapenv:Fault>",
            ))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("<ns:addRemoteDestination sequence".to_string()))
            .with_body(ok_response("addRemoteDestination"))
            .create_async()
            .await;
        mock_read_back(&mut server, true).await;

        let report = provision(&client_for(&server), &request()).await;

        // the failure is visible to aggregators
        let apply_step = report
            .steps
            .iter()
            .find(|step| step.step == ProvisionStep::ApplyLine)
            .unwrap();
        assert!(!apply_step.ok);
        assert!(apply_step.advisory);
        assert_eq!(apply_step.fault_code.as_deref(), Some("soapenv:Server"));

        // but only the read-back decides overall success
        assert!(report.fully_applied());
        assert_eq!(report.state, ProvisionState::Verified);
    }

    #[tokio::test]
    async fn duplicate_profile_fault_does_not_stop_the_workflow() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:updateUser".to_string()))
            .with_body(ok_response("updateUser"))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:addRemoteDestinationProfile".to_string()))
            .with_status(500)
            .with_body(duplicate_fault())
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:applyLine".to_string()))
            .with_body(ok_response("applyLine"))
            .create_async()
            .await;
        let add_destination = server
            .mock("POST", "/")
            .match_body(Matcher::Regex("<ns:addRemoteDestination sequence".to_string()))
            .with_body(ok_response("addRemoteDestination"))
            .create_async()
            .await;
        mock_read_back(&mut server, true).await;

        let report = provision(&client_for(&server), &request()).await;

        // destination creation ran against the presumed-existing profile
        add_destination.assert_async().await;

        assert!(!report.fully_applied());
        let profile_step = report
            .steps
            .iter()
            .find(|step| step.step == ProvisionStep::CreateProfile)
            .unwrap();
        assert!(!profile_step.ok);
        assert_eq!(profile_step.fault_code.as_deref(), Some("soapenv:Client"));
        assert!(profile_step
            .fault_detail
            .as_deref()
            .unwrap()
            .contains("UNIQUE INDEX"));

        let destination_step = report
            .steps
            .iter()
            .find(|step| step.step == ProvisionStep::CreateDestination)
            .unwrap();
        assert!(destination_step.ok);

        // the read-back still happened and reflects actual server state
        assert_eq!(report.state, ProvisionState::Verified);
        assert!(report.snapshot.is_some());
    }

    #[tokio::test]
    async fn transport_failure_on_one_step_is_recorded_and_skipped_past() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:updateUser".to_string()))
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:addRemoteDestinationProfile".to_string()))
            .with_body(ok_response("addRemoteDestinationProfile"))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:applyLine".to_string()))
            .with_body(ok_response("applyLine"))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("<ns:addRemoteDestination sequence".to_string()))
            .with_body(ok_response("addRemoteDestination"))
            .create_async()
            .await;
        mock_read_back(&mut server, true).await;

        let report = provision(&client_for(&server), &request()).await;

        let mobility_step = report
            .steps
            .iter()
            .find(|step| step.step == ProvisionStep::EnableMobility)
            .unwrap();
        assert!(!mobility_step.ok);
        assert!(mobility_step.fault_code.is_none());
        assert!(mobility_step.error.is_some());

        // later steps still ran
        assert!(report
            .steps
            .iter()
            .find(|step| step.step == ProvisionStep::CreateProfile)
            .unwrap()
            .ok);
        assert_eq!(report.state, ProvisionState::Verified);
    }
}

mod verification {
    use super::*;

    #[tokio::test]
    async fn reads_profiles_named_on_the_user_record() {
        let mut server = Server::new_async().await;
        mock_read_back(&mut server, true).await;

        let snapshot = verify(&client_for(&server), "testuser").await.unwrap();

        assert!(snapshot.user.is_some());
        assert_eq!(snapshot.profiles.len(), 1);
        assert_eq!(snapshot.profiles[0].name, "RDP_Teams_testuser");
        assert_eq!(snapshot.destinations.len(), 1);
        assert_eq!(snapshot.destinations[0].destination, "11235812463");
    }

    #[tokio::test]
    async fn falls_back_to_the_naming_convention_when_no_association_is_recorded() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("ns:getUser".to_string()))
            .with_body(user_response(false))
            .create_async()
            .await;
        let list_profiles = server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("listRemoteDestinationProfile".to_string()),
                Matcher::Regex("<name>RDP_Teams_testuser</name>".to_string()),
            ]))
            .with_body(profile_listing())
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(Matcher::Regex("<ns:listRemoteDestination sequence".to_string()))
            .with_body(destination_listing())
            .create_async()
            .await;

        let snapshot = verify(&client_for(&server), "testuser").await.unwrap();

        // the profile query used the conventional name
        list_profiles.assert_async().await;
        assert_eq!(snapshot.profiles[0].name, "RDP_Teams_testuser");
        assert_eq!(snapshot.destinations.len(), 1);
    }
}
