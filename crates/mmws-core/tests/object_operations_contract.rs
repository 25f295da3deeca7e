//! Contract Test: Object Operations
//!
//! Verifies how every object family talks to the transport.
//!
//! Constraints verified:
//! - `read` maps the "object not found" code to `None`, other failures propagate
//! - single-object lookups fail on zero and on several matches
//! - creates return the server-assigned reference
//! - deletes force removal with the family's object type and do not hide
//!   "not found"

mod common;

use common::*;
use mmws_core::error::Error;
use mmws_core::traits::{ObjectOperations, Transport};
use mmws_core::{
    DhcpReservation, DhcpReservations, DnsRecord, DnsRecordType, DnsRecords, DnsZone, DnsZones,
    TargetRef,
};
use serde_json::json;
use std::sync::Arc;

fn records(transport: &Arc<MockTransport>) -> DnsRecords {
    DnsRecords::new(Arc::clone(transport) as Arc<dyn Transport>)
}

fn zones(transport: &Arc<MockTransport>) -> DnsZones {
    DnsZones::new(Arc::clone(transport) as Arc<dyn Transport>)
}

fn reservations(transport: &Arc<MockTransport>) -> DhcpReservations {
    DhcpReservations::new(Arc::clone(transport) as Arc<dyn Transport>)
}

#[tokio::test]
async fn read_maps_not_found_to_none() {
    let transport = MockTransport::new();
    transport.not_found();

    let found = records(&transport).read("DNSRecords/42").await.unwrap();

    assert!(found.is_none());
    let call = transport.single_call();
    assert_eq!(call.method, "GET");
    assert_eq!(call.path, "DNSRecords/42");
}

#[tokio::test]
async fn read_propagates_other_server_errors() {
    let transport = MockTransport::new();
    transport.fail(request_error(403, 18, "Access denied"));

    let err = zones(&transport).read("DNSZones/3").await.unwrap_err();

    let request = err.as_request().expect("request error");
    assert_eq!(request.code, 18);
    assert_eq!(request.http_status, 403);
}

#[tokio::test]
async fn read_places_bare_ids_under_the_collection() {
    let transport = MockTransport::new();
    transport.respond(json!({
        "result": {"dhcpReservation": {"ref": "DHCPReservations/7", "name": "printer-3"}}
    }));

    let found = reservations(&transport)
        .read("printer-3")
        .await
        .unwrap()
        .expect("reservation exists");

    assert_eq!(found.reference, "DHCPReservations/7");
    assert_eq!(transport.single_call().path, "DHCPReservations/printer-3");
}

#[tokio::test]
async fn read_decodes_record_envelope() {
    let transport = MockTransport::new();
    transport.respond(json!({
        "result": {"dnsRecord": {
            "ref": "DNSRecords/42",
            "dnsZoneRef": "DNSZones/12",
            "type": "MX",
            "name": "@",
            "ttl": "3600",
            "data": "10 mail.example.com.",
            "comment": "",
            "aging": 0,
            "enabled": true
        }}
    }));

    let record = records(&transport)
        .read("DNSRecords/42")
        .await
        .unwrap()
        .expect("record exists");

    assert_eq!(record.record_type, DnsRecordType::Mx);
    assert_eq!(record.properties.data, "10 mail.example.com.");
}

#[tokio::test]
async fn find_one_with_no_match_fails() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"dnsZones": [], "totalResults": 0}}));

    let err = zones(&transport)
        .find_by_name("example.com.", "dns1.example.com.")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoMatch { .. }));
    assert_eq!(err.to_string(), "no DNS zones found matching your criteria");
}

#[tokio::test]
async fn find_one_with_several_matches_fails() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"dnsZones": [
        {"ref": "DNSZones/1", "name": "example.com."},
        {"ref": "DNSZones/2", "name": "example.com."}
    ]}}));

    let err = zones(&transport)
        .find_by_name("example.com.", "dns1.example.com.")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AmbiguousMatch { count: 2, .. }));
    assert_eq!(
        err.to_string(),
        "2 DNS zones found matching your criteria, but should be only 1"
    );
}

#[tokio::test]
async fn find_by_name_filters_on_name_and_authority() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"dnsZones": [
        {"ref": "DNSZones/1", "name": "example.com.", "authority": "dns1.example.com."}
    ]}}));

    let zone = zones(&transport)
        .find_by_name("example.com.", "dns1.example.com.")
        .await
        .unwrap();

    assert_eq!(zone.reference, "DNSZones/1");
    let call = transport.single_call();
    assert_eq!(call.path, "DNSZones");
    assert_eq!(
        call.filter,
        filter(&[("name", "example.com."), ("authority", "dns1.example.com.")])
    );
}

#[tokio::test]
async fn find_returns_every_match() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"dhcpReservations": [
        {"ref": "DHCPReservations/1", "name": "a"},
        {"ref": "DHCPReservations/2", "name": "b"}
    ]}}));

    let found = reservations(&transport)
        .find(&filter(&[("clientIdentifier", "00:11:22:33:44:55")]))
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn create_record_sends_target_reference_and_returns_ref() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"objRefs": ["DNSRecords/99"], "errors": []}}));

    let target = TargetRef::new("dns1.example.com.", "", "example.com.");
    let record = DnsRecord::new(&target, "www", DnsRecordType::A, "192.0.2.10").with_ttl(300);

    let reference = records(&transport).create(&record).await.unwrap();

    assert_eq!(reference, "DNSRecords/99");
    let call = transport.single_call();
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, "DNSRecords");
    let body = call.body.unwrap();
    assert_eq!(body["saveComment"], "created by mmctl");
    assert_eq!(body["forceOverrideOfNamingConflictCheck"], false);
    assert_eq!(
        body["dnsRecords"][0]["dnsZoneRef"],
        "dns1.example.com.::example.com."
    );
    assert_eq!(body["dnsRecords"][0]["ttl"], "300");
}

#[tokio::test]
async fn create_zone_returns_ref() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"ref": "DNSZones/5"}}));

    let zone = DnsZone::new("example.org.", "dns1.example.com.");
    let reference = zones(&transport).create(&zone).await.unwrap();

    assert_eq!(reference, "DNSZones/5");
    let body = transport.single_call().body.unwrap();
    assert_eq!(body["dnsZone"]["name"], "example.org.");
    assert_eq!(body["saveComment"], "created by mmctl");
}

#[tokio::test]
async fn create_reservation_posts_under_owner() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"ref": "DHCPReservations/11"}}));

    let reservation = DhcpReservation {
        name: "printer-3".to_string(),
        client_identifier: "00:11:22:33:44:55".to_string(),
        addresses: vec!["192.0.2.30".to_string()],
        owner_ref: "DHCPScopes/4".to_string(),
        ..DhcpReservation::default()
    };

    let reference = reservations(&transport).create(&reservation).await.unwrap();

    assert_eq!(reference, "DHCPReservations/11");
    assert_eq!(transport.single_call().path, "DHCPScopes/4/DHCPReservations");
}

#[tokio::test]
async fn create_reservation_without_owner_is_rejected_locally() {
    let transport = MockTransport::new();

    let reservation = DhcpReservation {
        name: "printer-3".to_string(),
        ..DhcpReservation::default()
    };
    let err = reservations(&transport)
        .create(&reservation)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Format(_)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn update_record_sends_properties_only() {
    let transport = MockTransport::new();

    let target = TargetRef::new("dns1.example.com.", "", "example.com.");
    let record = DnsRecord::new(&target, "www", DnsRecordType::A, "192.0.2.11")
        .with_comment("moved");

    records(&transport)
        .update(&record, "DNSRecords/42")
        .await
        .unwrap();

    let call = transport.single_call();
    assert_eq!(call.method, "PUT");
    assert_eq!(call.path, "DNSRecords/42");
    let body = call.body.unwrap();
    assert_eq!(body["ref"], "DNSRecords/42");
    assert_eq!(body["objType"], "DNSRecords");
    assert_eq!(body["saveComment"], "updated by mmctl");
    assert_eq!(body["properties"]["data"], "192.0.2.11");
    assert!(body["properties"].get("dnsZoneRef").is_none());
    assert!(body["properties"].get("type").is_none());
}

#[tokio::test]
async fn delete_passes_family_object_type() {
    let transport = MockTransport::new();

    records(&transport).delete("DNSRecords/42").await.unwrap();
    zones(&transport).delete("DNSZones/3").await.unwrap();
    reservations(&transport)
        .delete("DHCPReservations/7")
        .await
        .unwrap();

    let types: Vec<_> = transport
        .calls()
        .into_iter()
        .map(|c| (c.method, c.path, c.obj_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("DELETE", "DNSRecords/42".to_string(), Some("DNSRecord".to_string())),
            ("DELETE", "DNSZones/3".to_string(), Some("DNSZone".to_string())),
            (
                "DELETE",
                "DHCPReservations/7".to_string(),
                Some("DHCPReservation".to_string())
            ),
        ]
    );
}

#[tokio::test]
async fn delete_does_not_hide_not_found() {
    let transport = MockTransport::new();
    transport.not_found();

    let err = records(&transport)
        .delete("DNSRecords/42")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn find_keeps_records_of_unlisted_types() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"dnsRecords": [
        {"ref": "DNSRecords/1", "type": "A", "name": "www", "data": "192.0.2.10"},
        {"ref": "DNSRecords/2", "type": "CAA", "name": "@", "data": "0 issue \"ca.example.net\""}
    ]}}));

    let found = records(&transport)
        .find(&filter(&[("name", "@")]))
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].record_type, DnsRecordType::A);
    assert_eq!(found[1].record_type, DnsRecordType::Other("CAA".to_string()));
}

#[tokio::test]
async fn read_returns_record_of_unlisted_type() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {"dnsRecord": {
        "ref": "DNSRecords/5",
        "type": "WKS",
        "name": "host",
        "data": "192.0.2.1 TCP 25"
    }}}));

    let record = records(&transport)
        .read("DNSRecords/5")
        .await
        .unwrap()
        .expect("record exists");

    assert_eq!(record.record_type.as_str(), "WKS");
    assert!(!record.record_type.is_known());
}

#[tokio::test]
async fn create_rejected_by_server_reports_its_messages() {
    let transport = MockTransport::new();
    transport.respond(json!({"result": {
        "objRefs": [],
        "errors": [{"code": 2049, "message": "Invalid data for A record"}]
    }}));

    let target = TargetRef::new("dns1.example.com.", "", "example.com.");
    let record = DnsRecord::new(&target, "www", DnsRecordType::A, "not-an-address");

    let err = records(&transport).create(&record).await.unwrap_err();

    assert!(matches!(err, Error::Rejected(ref msg) if msg == "Invalid data for A record"));
    assert_eq!(
        err.to_string(),
        "Server rejected the object: Invalid data for A record"
    );
}
