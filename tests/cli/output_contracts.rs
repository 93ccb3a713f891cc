use std::fs;

use roster::error::{ApiError, StoreError};
use roster::tooling::cli::{CliContext, Commands, InsightCommands};
use tempfile::TempDir;

use crate::cli::support::{context_for, with_xdg_env};

fn add(cli: &CliContext, id: &str, name: &str, course: &str, gpa: f64) {
    cli.execute(&Commands::Add {
        id: id.to_string(),
        name: name.to_string(),
        age: 20,
        course: course.to_string(),
        gpa,
    })
    .unwrap();
}

fn seeded(temp_dir: &TempDir) -> CliContext {
    let cli = context_for(&temp_dir.path().join("students.txt"));
    add(&cli, "A1", "Asha", "CS", 9.5);
    add(&cli, "B2", "Bo", "Math", 4.0);
    add(&cli, "C3", "Cy", "CS", 6.0);
    cli
}

#[test]
fn list_json_contract_preserves_insertion_order() {
    let temp_dir = TempDir::new().unwrap();
    let cli = seeded(&temp_dir);

    let output = cli
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let records = parsed.as_array().unwrap();
    let ids: Vec<&str> = records
        .iter()
        .map(|r| r.get("id").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(ids, vec!["A1", "B2", "C3"]);
    for record in records {
        assert!(record.get("name").and_then(|v| v.as_str()).is_some());
        assert!(record.get("age").and_then(|v| v.as_u64()).is_some());
        assert!(record.get("course").and_then(|v| v.as_str()).is_some());
        assert!(record.get("gpa").and_then(|v| v.as_f64()).is_some());
    }
}

#[test]
fn dashboard_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let cli = seeded(&temp_dir);

    let output = cli
        .execute(&Commands::Dashboard {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(parsed.get("mean_gpa").and_then(|v| v.as_f64()), Some(6.5));
    assert_eq!(parsed.get("max_gpa").and_then(|v| v.as_f64()), Some(9.5));
    assert_eq!(
        parsed.get("top_student_name").and_then(|v| v.as_str()),
        Some("Asha")
    );
    assert_eq!(parsed.get("at_risk_count").and_then(|v| v.as_u64()), Some(1));
}

#[test]
fn empty_dashboard_json_omits_max_gpa() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context_for(&temp_dir.path().join("students.txt"));

    let output = cli
        .execute(&Commands::Dashboard {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(
        parsed.get("top_student_name").and_then(|v| v.as_str()),
        Some("N/A")
    );
    assert!(parsed.get("max_gpa").is_none());
}

#[test]
fn stats_and_courses_json_contracts() {
    let temp_dir = TempDir::new().unwrap();
    let cli = seeded(&temp_dir);

    let stats: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::Stats {
            format: "json".to_string(),
        })
        .unwrap(),
    )
    .unwrap();
    assert_eq!(stats.get("median_gpa").and_then(|v| v.as_f64()), Some(6.0));
    let distribution = stats.get("distribution").unwrap();
    assert_eq!(distribution.get("excellent").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(distribution.get("poor").and_then(|v| v.as_u64()), Some(1));

    let courses: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::Courses {
            format: "json".to_string(),
        })
        .unwrap(),
    )
    .unwrap();
    let names: Vec<&str> = courses
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.get("course").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(names, vec!["CS", "Math"]);
}

#[test]
fn top_and_at_risk_json_contracts() {
    let temp_dir = TempDir::new().unwrap();
    let cli = seeded(&temp_dir);

    let top: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::Top {
            count: 2,
            format: "json".to_string(),
        })
        .unwrap(),
    )
    .unwrap();
    let names: Vec<&str> = top
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.get("name").and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(names, vec!["Asha", "Cy"]);

    let risk: serde_json::Value = serde_json::from_str(
        &cli.execute(&Commands::AtRisk {
            format: "json".to_string(),
        })
        .unwrap(),
    )
    .unwrap();
    let risk = risk.as_array().unwrap();
    assert_eq!(risk.len(), 1);
    assert_eq!(risk[0].get("id").and_then(|v| v.as_str()), Some("B2"));
}

#[test]
fn mutations_persist_across_contexts() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("students.txt");
    {
        let cli = seeded(&temp_dir);
        cli.execute(&Commands::Update {
            id: "B2".to_string(),
            name: None,
            age: None,
            course: None,
            gpa: Some(7.25),
        })
        .unwrap();
        cli.execute(&Commands::Delete {
            id: "C3".to_string(),
            force: true,
        })
        .unwrap();
    }

    let contents = fs::read_to_string(&data_file).unwrap();
    assert_eq!(
        contents,
        "1001\nA1\nAsha\n20\nCS\n9.5\nB2\nBo\n20\nMath\n7.25\n"
    );

    let cli = context_for(&data_file);
    let output = cli
        .execute(&Commands::Show {
            id: "B2".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("gpa").and_then(|v| v.as_f64()), Some(7.25));
}

#[test]
fn unknown_id_reports_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let cli = seeded(&temp_dir);

    let err = cli
        .execute(&Commands::Show {
            id: "Z9".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::StorageError(StoreError::NotFound(_))));
    assert_eq!(err.to_string(), "Student with ID 'Z9' not found");
}

#[test]
fn malformed_data_file_surfaces_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("students.txt");
    fs::write(&data_file, "1001\nA1\nAsha\n20\nCS\n").unwrap();

    let err = CliContext::new(
        &roster::config::RosterConfig::default(),
        Some(&data_file),
        temp_dir.path(),
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn insight_commands_render_template_reports() {
    let temp_dir = TempDir::new().unwrap();
    let cli = seeded(&temp_dir);

    let class = cli
        .execute(&Commands::Insight {
            command: InsightCommands::Class,
        })
        .unwrap();
    assert!(class.contains("Class Analysis"));

    let intervene = cli
        .execute(&Commands::Insight {
            command: InsightCommands::Intervene {
                id: "B2".to_string(),
            },
        })
        .unwrap();
    assert!(intervene.contains("Bo"));

    let predict = cli
        .execute(&Commands::Insight {
            command: InsightCommands::Predict,
        })
        .unwrap();
    assert!(predict.contains("Predictive Insights"));
}

#[test]
fn local_config_file_selects_data_file() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = temp_dir.path().join("workspace");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join("roster.toml"),
            "[storage]\ndata_file = \"class/students.txt\"\n",
        )
        .unwrap();

        let config = CliContext::load_config(None, &workspace).unwrap();
        let cli = CliContext::new(&config, None, &workspace).unwrap();
        add(&cli, "A1", "Asha", "CS", 9.5);

        assert!(workspace.join("class").join("students.txt").exists());
    });
}

#[test]
fn default_data_file_lives_under_xdg_data_home() {
    let temp_dir = TempDir::new().unwrap();
    with_xdg_env(&temp_dir, || {
        let workspace = temp_dir.path().join("workspace");
        fs::create_dir_all(&workspace).unwrap();

        let config = CliContext::load_config(None, &workspace).unwrap();
        let cli = CliContext::new(&config, None, &workspace).unwrap();
        add(&cli, "A1", "Asha", "CS", 9.5);

        assert!(temp_dir
            .path()
            .join("data")
            .join("roster")
            .join("students.txt")
            .exists());
    });
}
