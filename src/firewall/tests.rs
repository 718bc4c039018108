//! Unit tests for firewall rule shaping and decoding.

use serde_json::json;

use super::*;

fn ssh_accept_rule() -> FirewallRule {
    FirewallRule {
        action: "accept".to_owned(),
        direction: "in".to_owned(),
        family: Some("IPv4".to_owned()),
        protocol: Some("tcp".to_owned()),
        destination_port_start: Some("22".to_owned()),
        destination_port_end: Some("22".to_owned()),
        comment: Some("ssh".to_owned()),
        ..FirewallRule::default()
    }
}

#[test]
fn rule_serialises_without_unset_match_fields() {
    let body = serde_json::to_value(FirewallRuleWrapper {
        firewall_rule: &ssh_accept_rule(),
    })
    .expect("serialises");
    assert_eq!(
        body,
        json!({
            "firewall_rule": {
                "action": "accept",
                "direction": "in",
                "family": "IPv4",
                "protocol": "tcp",
                "destination_port_start": "22",
                "destination_port_end": "22",
                "comment": "ssh"
            }
        })
    );
}

#[test]
fn rule_list_decodes_in_position_order() {
    let body = r#"{
      "firewall_rules": {
        "firewall_rule": [
          {"position": "1", "action": "accept", "direction": "in", "protocol": "tcp"},
          {"position": "2", "action": "drop", "direction": "in"}
        ]
      }
    }"#;
    let decoded: FirewallRuleListResponse = serde_json::from_str(body).expect("fixture decodes");
    let positions: Vec<Option<&str>> = decoded
        .firewall_rules
        .firewall_rule
        .iter()
        .map(|rule| rule.position.as_deref())
        .collect();
    assert_eq!(positions, vec![Some("1"), Some("2")]);
}

#[test]
fn rule_round_trips_structurally() {
    let rule = ssh_accept_rule();
    let encoded = serde_json::to_value(&rule).expect("serialises");
    let decoded: FirewallRule = serde_json::from_value(encoded).expect("decodes");
    assert_eq!(decoded, rule);
}
