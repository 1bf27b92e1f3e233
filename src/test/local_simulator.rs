use std::collections::BTreeMap;

use crate::Error;
use crate::algo::LoadBalance;
use crate::sim::{
    LocalSimulator, ServiceCatalogue, SimConfig, SimulatorAction, SimulatorInterface,
};
use crate::topo::NetworkSpec;

fn network(raw: &str) -> NetworkSpec {
    let net: NetworkSpec = serde_json::from_str(raw).expect("parse network");
    net.validate().expect("valid network");
    net
}

fn catalogue(raw: &str) -> ServiceCatalogue {
    let c: ServiceCatalogue = serde_yaml::from_str(raw).expect("parse catalogue");
    c.validate().expect("valid catalogue");
    c
}

fn triangle() -> NetworkSpec {
    network(
        r#"
        {
            "nodes": [
                { "id": "pop0", "type": "Ingress" },
                { "id": "pop1" },
                { "id": "pop2" }
            ],
            "links": [
                { "source": "pop0", "target": "pop1", "delay": 1 },
                { "source": "pop1", "target": "pop2", "delay": 1 },
                { "source": "pop0", "target": "pop2", "delay": 1 }
            ]
        }
        "#,
    )
}

fn two_sf_chain() -> ServiceCatalogue {
    catalogue(
        r#"
sfc_list:
  sfc_1: [a, b]
sf_list:
  a: { processing_delay_mean: 2.0 }
  b: { processing_delay_mean: 3.0 }
"#,
    )
}

/// 所有流量都发往 `dst` 的单 SF 动作
fn route_all_to(nodes: &[&str], dst: &str, sf: &str) -> SimulatorAction {
    let mut placement = BTreeMap::new();
    let mut schedule = BTreeMap::new();
    for node in nodes {
        placement.insert(node.to_string(), vec![sf.to_string()]);
        let mut dist = BTreeMap::new();
        for d in nodes {
            dist.insert(d.to_string(), if *d == dst { 1.0 } else { 0.0 });
        }
        let mut per_sf = BTreeMap::new();
        per_sf.insert(sf.to_string(), dist);
        let mut per_sfc = BTreeMap::new();
        per_sfc.insert("sfc_1".to_string(), per_sf);
        schedule.insert(node.to_string(), per_sfc);
    }
    SimulatorAction::new(placement, schedule)
}

#[test]
fn apply_before_init_fails() {
    let mut sim = LocalSimulator::from_parts(triangle(), two_sf_chain(), SimConfig::default())
        .expect("valid parts");
    let action = route_all_to(&["pop0", "pop1", "pop2"], "pop0", "a");
    assert!(matches!(sim.apply(&action), Err(Error::NotInitialized)));
}

#[test]
fn init_reports_topology_and_catalogue_with_zero_stats() {
    let mut sim = LocalSimulator::from_parts(triangle(), two_sf_chain(), SimConfig::default())
        .expect("valid parts");
    let state = sim.init(1).expect("init");
    assert_eq!(state.node_ids(), vec!["pop0", "pop1", "pop2"]);
    assert_eq!(state.sf_ids(), vec!["a", "b"]);
    assert_eq!(state.sfc_ids(), vec!["sfc_1"]);
    assert_eq!(state.network_stats.total_flows, 0);
    assert_eq!(sim.network().ingress_nodes(), vec!["pop0"]);
}

#[test]
fn uniform_action_on_connected_network_delivers_every_flow() {
    let mut sim = LocalSimulator::from_parts(triangle(), two_sf_chain(), SimConfig::default())
        .expect("valid parts");
    let state = sim.init(7).expect("init");
    let action = LoadBalance::from_state(&state).action().expect("action");

    // 确定性到达：10, 20, ..., 90
    let s1 = sim.apply(&action).expect("apply #1").network_stats;
    assert_eq!(s1.run_total_flows, 9);
    assert_eq!(s1.run_successful_flows, 9);
    assert_eq!(s1.run_dropped_flows, 0);
    // 处理时延 2 + 3，加上至多两跳链路时延
    assert!(s1.run_avg_end2end_delay >= 5.0 && s1.run_avg_end2end_delay <= 7.0);
    assert!(s1.run_max_end2end_delay <= 7.0);

    let s2 = sim.apply(&action).expect("apply #2").network_stats;
    assert_eq!(s2.total_flows, 18);
    assert_eq!(s2.successful_flows, 18);
    assert_eq!(s2.run_total_flows, 9);
    assert_eq!(sim.runs(), 2);
}

#[test]
fn unreachable_destination_drops_flows() {
    let net = network(
        r#"{ "nodes": [ { "id": "pop0", "type": "Ingress" }, { "id": "island" } ] }"#,
    );
    let services = catalogue("sfc_list: { sfc_1: [a] }\nsf_list: { a: {} }\n");
    let mut sim = LocalSimulator::from_parts(net, services, SimConfig::default())
        .expect("valid parts");
    sim.init(3).expect("init");

    let action = route_all_to(&["pop0", "island"], "island", "a");
    let stats = sim.apply(&action).expect("apply").network_stats;
    assert_eq!(stats.run_total_flows, 9);
    assert_eq!(stats.run_dropped_flows, 9);
    assert_eq!(stats.run_successful_flows, 0);
}

#[test]
fn node_capacity_is_consumed_and_reset_every_run() {
    let net = network(r#"{ "nodes": [ { "id": "pop0", "type": "Ingress", "cap": 3 } ] }"#);
    let services = catalogue("sfc_list: { sfc_1: [a] }\nsf_list: { a: {} }\n");
    let mut sim = LocalSimulator::from_parts(net, services, SimConfig::default())
        .expect("valid parts");
    sim.init(3).expect("init");

    let action = route_all_to(&["pop0"], "pop0", "a");
    let s1 = sim.apply(&action).expect("apply #1").network_stats;
    assert_eq!(s1.run_successful_flows, 3);
    assert_eq!(s1.run_dropped_flows, 6);

    let s2 = sim.apply(&action).expect("apply #2").network_stats;
    assert_eq!(s2.run_successful_flows, 3);
    assert_eq!(s2.successful_flows, 6);
    assert_eq!(s2.dropped_flows, 12);
}

#[test]
fn flows_are_dropped_where_sf_is_not_placed() {
    let net = network(
        r#"
        {
            "nodes": [ { "id": "pop0", "type": "Ingress" }, { "id": "pop1" } ],
            "links": [ { "source": "pop0", "target": "pop1", "delay": 2 } ]
        }
        "#,
    );
    let services = catalogue("sfc_list: { sfc_1: [a] }\nsf_list: { a: {} }\n");
    let mut sim = LocalSimulator::from_parts(net, services, SimConfig::default())
        .expect("valid parts");
    sim.init(3).expect("init");

    let mut action = route_all_to(&["pop0", "pop1"], "pop1", "a");
    action.placement.insert("pop1".to_string(), vec![]);
    let stats = sim.apply(&action).expect("apply").network_stats;
    assert_eq!(stats.run_dropped_flows, 9);
}

#[test]
fn end_to_end_delay_adds_link_and_processing_delay() {
    let net = network(
        r#"
        {
            "nodes": [ { "id": "pop0", "type": "Ingress" }, { "id": "pop1" } ],
            "links": [ { "source": "pop0", "target": "pop1", "delay": 2 } ]
        }
        "#,
    );
    let services =
        catalogue("sfc_list: { sfc_1: [a] }\nsf_list: { a: { processing_delay_mean: 5.0 } }\n");
    let mut sim = LocalSimulator::from_parts(net, services, SimConfig::default())
        .expect("valid parts");
    sim.init(3).expect("init");

    let action = route_all_to(&["pop0", "pop1"], "pop1", "a");
    let stats = sim.apply(&action).expect("apply").network_stats;
    assert_eq!(stats.run_successful_flows, 9);
    assert!((stats.run_avg_end2end_delay - 7.0).abs() < 1e-9);
    assert!((stats.run_max_end2end_delay - 7.0).abs() < 1e-9);
}

#[test]
fn invalid_action_is_rejected_and_simulator_stays_usable() {
    let mut sim = LocalSimulator::from_parts(triangle(), two_sf_chain(), SimConfig::default())
        .expect("valid parts");
    let state = sim.init(5).expect("init");
    let good = LoadBalance::from_state(&state).action().expect("action");

    let mut bad = good.clone();
    bad.schedule
        .get_mut("pop0")
        .and_then(|m| m.get_mut("sfc_1"))
        .and_then(|m| m.get_mut("a"))
        .expect("leaf")
        .insert("pop1".to_string(), 0.9);
    assert!(matches!(sim.apply(&bad), Err(Error::InvalidAction(_))));

    let mut unknown = good.clone();
    unknown.placement.insert("ghost".to_string(), vec![]);
    assert!(matches!(sim.apply(&unknown), Err(Error::InvalidAction(_))));

    let stats = sim.apply(&good).expect("apply").network_stats;
    assert_eq!(stats.run_total_flows, 9);
}

#[test]
fn same_seed_gives_identical_stats() {
    let config = SimConfig {
        deterministic_arrival: false,
        inter_arrival_mean: 4.0,
        flow_dr_stdev: 0.5,
        ..SimConfig::default()
    };
    let run = |seed: u64| {
        let mut sim = LocalSimulator::from_parts(triangle(), two_sf_chain(), config.clone())
            .expect("valid parts");
        let state = sim.init(seed).expect("init");
        let action = LoadBalance::from_state(&state).action().expect("action");
        (0..3)
            .map(|_| sim.apply(&action).expect("apply").network_stats)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn from_parts_rejects_unvalidated_resources() {
    // 直接反序列化、未经校验的目录：链引用了未定义的 SF
    let services: ServiceCatalogue =
        serde_yaml::from_str("sfc_list: { sfc_1: [a, ghost] }\nsf_list: { a: {} }\n")
            .expect("parse catalogue");
    assert!(matches!(
        LocalSimulator::from_parts(triangle(), services, SimConfig::default()),
        Err(Error::InvalidServices(_))
    ));

    let config = SimConfig {
        inter_arrival_mean: 1e-12,
        ..SimConfig::default()
    };
    assert!(matches!(
        LocalSimulator::from_parts(triangle(), two_sf_chain(), config),
        Err(Error::InvalidConfig(_))
    ));

    let empty = NetworkSpec::default();
    assert!(matches!(
        LocalSimulator::from_parts(empty, two_sf_chain(), SimConfig::default()),
        Err(Error::InvalidNetwork(_))
    ));
}
