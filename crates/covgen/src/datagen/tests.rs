use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use cov_config::{CovgenConfig, FilesConfig};
use cov_core::{CoverageInfo, SampleError, WeightedCatalog};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use super::*;

fn roles() -> WeightedCatalog {
    WeightedCatalog::new([("VPA", 0.6), ("MS", 0.125), ("RP", 0.025), ("RR", 0.001)]).unwrap()
}

fn files_config() -> FilesConfig {
    FilesConfig {
        path: "files.csv".into(),
        filename_column: "filename".into(),
        id_column: "id".into(),
    }
}

fn pool(n: usize) -> Vec<ReportFile> {
    (0..n)
        .map(|i| ReportFile {
            filename: format!("report_{i}.pdf"),
            id: format!("id-{i}"),
        })
        .collect()
}

fn report_types() -> Vec<CoverageInfo<ReportType>> {
    vec![
        CoverageInfo::new(
            ReportType {
                id: "R1".into(),
                title: "Monthly".into(),
            },
            0.7,
        ),
        CoverageInfo::new(
            ReportType {
                id: "R2".into(),
                title: "Yearly".into(),
            },
            0.3,
        ),
    ]
}

fn population(rng: &mut StdRng) -> Population {
    let users = generate_users(50, 1, &roles(), 3, rng).unwrap();
    Population::new(users, &["VPA".to_string()])
}

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 7)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

#[test]
fn users_numbered_from_offset() {
    let mut rng = StdRng::seed_from_u64(1);
    let users = generate_users(3, 41, &roles(), 3, &mut rng).unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["User00041", "User00042", "User00043"]);
    assert_eq!(users[0].password, "00041");
}

#[test]
fn users_hold_one_to_three_distinct_roles() {
    let mut rng = StdRng::seed_from_u64(2);
    let catalog = roles();
    for user in generate_users(200, 0, &catalog, 3, &mut rng).unwrap() {
        assert!((1..=3).contains(&user.roles.len()));
        let distinct: HashSet<&String> = user.roles.iter().collect();
        assert_eq!(distinct.len(), user.roles.len());
        assert!(user.roles.iter().all(|r| catalog.contains(r)));
    }
}

#[test]
fn population_delegates_and_actors() {
    let users = vec![
        User {
            username: "User00000".into(),
            password: "00000".into(),
            roles: vec!["VPA".into()],
        },
        User {
            username: "User00001".into(),
            password: "00001".into(),
            roles: vec!["MS".into(), "RR".into()],
        },
    ];
    let pop = Population::new(users, &["RR".to_string()]);
    assert_eq!(pop.delegates(), &[1]);
    let actor = pop.actor(1).unwrap();
    assert_eq!(actor.oid, 1);
    assert_eq!(actor.login, "User00001");
    assert_eq!(actor.role, "MS");
    assert!(pop.actor(2).is_none());
}

// ---------------------------------------------------------------------------
// file pool
// ---------------------------------------------------------------------------

#[test]
fn file_pool_with_ids() {
    let csv = "filename,id\na.pdf,11\nb.docx,22\n";
    let mut rng = StdRng::seed_from_u64(3);
    let files = read_file_pool(csv.as_bytes(), &files_config(), &mut rng).unwrap();
    assert_eq!(
        files,
        vec![
            ReportFile {
                filename: "a.pdf".into(),
                id: "11".into()
            },
            ReportFile {
                filename: "b.docx".into(),
                id: "22".into()
            },
        ]
    );
}

#[test]
fn file_pool_derives_missing_ids_from_rng() {
    let csv = "filename\na.pdf\n\nb.docx\n";
    let load = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        read_file_pool(csv.as_bytes(), &files_config(), &mut rng).unwrap()
    };
    let first = load(9);
    assert_eq!(first.len(), 2);
    assert_eq!(first, load(9));
    assert_ne!(first[0].id, load(10)[0].id);
    let uuid = uuid::Uuid::parse_str(&first[0].id).unwrap();
    assert_eq!(uuid.get_version_num(), 4);
}

#[test]
fn file_pool_requires_filename_column() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(read_file_pool("name,id\na,1\n".as_bytes(), &files_config(), &mut rng).is_err());
}

// ---------------------------------------------------------------------------
// report types
// ---------------------------------------------------------------------------

#[test]
fn report_weights_normalized() {
    let config: CovgenConfig = BASE_TOML.parse().unwrap();
    let coverage = report_coverage(&config.report_types).unwrap();
    assert_eq!(coverage.len(), 2);
    let total: f64 = coverage.iter().map(|c| c.probability).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(coverage[0].probability > coverage[1].probability);

    let raw: CovgenConfig = BASE_TOML
        .replace("[report_types]", "[report_types]\nnormalize = \"none\"")
        .parse()
        .unwrap();
    let coverage = report_coverage(&raw.report_types).unwrap();
    assert_eq!(coverage[0].probability, 2.0);
    assert_eq!(coverage[1].probability, 1.0);
}

// ---------------------------------------------------------------------------
// record factory
// ---------------------------------------------------------------------------

#[test]
fn factory_rejects_small_pool() {
    let mut rng = StdRng::seed_from_u64(4);
    let pop = population(&mut rng);
    let files = pool(4);
    let err = RecordFactory::new(&pop, &files, report_types(), RecordFactoryOptions::default())
        .unwrap_err();
    assert!(matches!(err, SampleError::DegenerateSubsetRequest(_)));
}

#[test]
fn factory_rejects_empty_inputs() {
    let mut rng = StdRng::seed_from_u64(4);
    let pop = population(&mut rng);
    let files = pool(10);
    let opts = RecordFactoryOptions::default();

    let err = RecordFactory::new(&pop, &[], report_types(), opts).unwrap_err();
    assert!(matches!(err, SampleError::EmptyInput(_)));
    let err = RecordFactory::new(&pop, &files, Vec::new(), opts).unwrap_err();
    assert!(matches!(err, SampleError::EmptyInput(_)));

    let no_delegates = Population::new(pop.users().to_vec(), &[]);
    let err = RecordFactory::new(&no_delegates, &files, report_types(), opts).unwrap_err();
    assert!(matches!(err, SampleError::EmptyInput(_)));
    let opts = RecordFactoryOptions {
        substitution_rate: 0.0,
        ..opts
    };
    assert!(RecordFactory::new(&no_delegates, &files, report_types(), opts).is_ok());
}

#[test]
fn records_reference_one_to_max_unique_files() {
    let mut rng = StdRng::seed_from_u64(5);
    let pop = population(&mut rng);
    let files = pool(30);
    let factory =
        RecordFactory::new(&pop, &files, report_types(), RecordFactoryOptions::default()).unwrap();
    let mut sizes = HashSet::new();
    for _ in 0..2_000 {
        let record = factory.create(noon(), &mut rng).unwrap();
        assert_eq!(record.downloaded_at, noon());
        assert!((1..=4).contains(&record.reports.len()));
        let ids: HashSet<&str> = record.reports.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), record.reports.len());
        sizes.insert(record.reports.len());
    }
    assert_eq!(sizes.len(), 4);
}

#[test]
fn forced_substitution_and_channel() {
    let mut rng = StdRng::seed_from_u64(6);
    let pop = population(&mut rng);
    let files = pool(10);
    let opts = RecordFactoryOptions {
        substitution_rate: 1.0,
        max_reports: 2,
        intranet_ratio: 1.0,
    };
    let factory = RecordFactory::new(&pop, &files, report_types(), opts).unwrap();
    for _ in 0..200 {
        let record = factory.create(noon(), &mut rng).unwrap();
        let sub = record.substitution.expect("substitution forced");
        assert!(pop.users()[sub.oid].roles.contains(&"VPA".to_string()));
        assert_eq!(record.channel, Channel::Intranet);
        assert!(record.reports.len() <= 2);
    }

    let opts = RecordFactoryOptions {
        substitution_rate: 0.0,
        max_reports: 2,
        intranet_ratio: 0.0,
    };
    let factory = RecordFactory::new(&pop, &files, report_types(), opts).unwrap();
    for _ in 0..200 {
        let record = factory.create(noon(), &mut rng).unwrap();
        assert!(record.substitution.is_none());
        assert_eq!(record.channel, Channel::Extranet);
    }
}

#[test]
fn default_rates_hold_over_many_records() {
    let mut rng = StdRng::seed_from_u64(12);
    let pop = population(&mut rng);
    let files = pool(10);
    let factory =
        RecordFactory::new(&pop, &files, report_types(), RecordFactoryOptions::default()).unwrap();
    let n = 100_000;
    let mut intranet = 0usize;
    let mut substituted = 0usize;
    for _ in 0..n {
        let record = factory.create(noon(), &mut rng).unwrap();
        if record.channel == Channel::Intranet {
            intranet += 1;
        }
        if record.substitution.is_some() {
            substituted += 1;
        }
    }
    let intranet = intranet as f64 / n as f64;
    let substituted = substituted as f64 / n as f64;
    assert!((intranet - 1.0 / 3.0).abs() < 0.01, "intranet {intranet}");
    assert!((substituted - 0.01).abs() < 0.002, "substituted {substituted}");
}

#[test]
fn record_json_layout() {
    let record = AccessRecord {
        user: Actor {
            oid: 3,
            login: "User00003".into(),
            role: "VPA".into(),
        },
        substitution: None,
        downloaded_at: noon(),
        channel: Channel::Extranet,
        reports: pool(1),
        report_type: ReportType {
            id: "R1".into(),
            title: "Monthly".into(),
        },
    };
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "user": {"oid": 3, "login": "User00003", "role": "VPA"},
            "substitution": null,
            "downloaded_at": "2025-01-07 12:00:00",
            "from": "extranet",
            "reports": [{"filename": "report_0.pdf", "id": "id-0"}],
            "report_type": {"id": "R1", "title": "Monthly"}
        })
    );
}

// ---------------------------------------------------------------------------
// document updates
// ---------------------------------------------------------------------------

#[test]
fn document_updates_draw_from_catalogs() {
    let config: CovgenConfig = BASE_TOML.parse().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let pop = population(&mut rng);
    let factory = DocumentUpdateFactory::new(&config.catalogs, &pop).unwrap();
    for _ in 0..100 {
        let update = factory.create(&mut rng).unwrap();
        assert!(["Area1", "Area2"].contains(&update.mainarea.as_str()));
        assert_eq!(update.subarea, "SubArea1");
        assert!(update.product.starts_with("Product"));
        assert!(update.placement.starts_with("Placement"));
        assert_eq!(update.users.len(), 3);
        assert!(update.users.iter().all(|u| u.starts_with("User")));
    }
}

#[test]
fn document_updates_need_all_catalogs() {
    let config: CovgenConfig = BASE_TOML
        .replace("[catalogs.placements]", "[catalogs.unused]")
        .parse()
        .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let pop = population(&mut rng);
    assert!(DocumentUpdateFactory::new(&config.catalogs, &pop).is_err());
}

const BASE_TOML: &str = r#"
[generation]
index = "docs"
daily_baseline = 10.0

[users]
count = 10
delegation_roles = ["MS"]

[traffic]
weekday = [1, 1, 1, 1, 1, 1, 1]
daypart = [1]

[catalogs.user_roles]
VPA = 0.6
MS = 0.4

[catalogs.main_areas]
Area1 = 0.5
Area2 = 0.5

[catalogs.sub_areas]
SubArea1 = 1.0

[catalogs.products]
Product1 = 0.5
Product2 = 0.5

[catalogs.placements]
Placement1 = 0.7
Placement2 = 0.3

[report_types]

[[report_types.entries]]
id = "R1"
title = "Monthly"
weight = 2.0

[[report_types.entries]]
id = "R2"
title = "Yearly"
weight = 1.0

[files]
path = "files.csv"
"#;
