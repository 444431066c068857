//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 文件到文件的 e2e 测试（loader -> engine -> sinks）
//! - 输出排序的性质测试

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::ReportConfig;

    #[test]
    fn test_default_config_survives_toml() {
        let config = ReportConfig::default();
        let toml = ConfigLoader::to_toml(&config).unwrap();
        let reloaded = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_report_header_is_fixed() {
        assert_eq!(
            report_writer::REPORT_HEADER,
            [
                "Year",
                "Program",
                "Approval Time (Average)",
                "Approval Time Excl. Weekends (Average)",
            ]
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use approval_engine::ApprovalEngine;
    use contracts::{
        DuplicatePolicy, FloatFormat, InputEncoding, InputSource, OutOfOrderPolicy, ReportConfig,
        ReportError, ReportSink, UnmatchedProgramPolicy,
    };
    use ingestion::InputLoader;
    use report_writer::{ConsoleSink, CsvSink, DispatcherBuilder, LogSink};
    use tempfile::TempDir;

    const HEADER_APPROVALS: &str = "Record Name,Step: Name,Step Completed Date\n";
    const HEADER_REQUESTS: &str = "Request: Reference Number,Top Level Primary Program\n";
    const HEADER_OUTPUT: &str =
        "Year,Program,Approval Time (Average),Approval Time Excl. Weekends (Average)\n";

    /// Test fixture: two input files in a temp dir and a config pointing at them
    struct Fixture {
        dir: TempDir,
        config: ReportConfig,
    }

    impl Fixture {
        fn new(approvals: &str, requests: &[u8]) -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(
                dir.path().join("approvals.csv"),
                format!("{HEADER_APPROVALS}{approvals}"),
            )
            .unwrap();
            let mut request_bytes = HEADER_REQUESTS.as_bytes().to_vec();
            request_bytes.extend_from_slice(requests);
            fs::write(dir.path().join("requests.csv"), request_bytes).unwrap();

            let mut config = ReportConfig::default();
            config.inputs.approvals =
                InputSource::new(dir.path().join("approvals.csv"), InputEncoding::Utf8);
            config.inputs.requests =
                InputSource::new(dir.path().join("requests.csv"), InputEncoding::Latin1);
            config.output.path = dir.path().join("outputs/approval_days_by_program.csv");
            Self { dir, config }
        }

        fn output_path(&self) -> PathBuf {
            self.config.output.path.clone()
        }

        /// Run loader -> engine -> csv/log/console sinks; returns console text
        fn run(&self) -> Result<String, ReportError> {
            let inputs = InputLoader::new(&self.config).load()?;
            let output = ApprovalEngine::new(
                self.config.steps.clone(),
                self.config.processing.clone(),
            )
            .run(&inputs.approvals, &inputs.requests)?;

            let mut console = ConsoleSink::new(
                "console",
                Vec::new(),
                &self.config.output.path,
                self.config.output.float_format,
                true,
            );
            DispatcherBuilder::new()
                .with_sink(CsvSink::new(
                    "csv",
                    &self.config.output.path,
                    self.config.output.float_format,
                ))
                .with_sink(LogSink::new("log"))
                .build()
                .unwrap()
                .dispatch(&output.report)
                .unwrap();

            console.write(&output.report)?;
            Ok(String::from_utf8(console.into_inner()).unwrap())
        }

        fn csv(&self) -> String {
            fs::read_to_string(self.output_path()).unwrap()
        }

        fn dir(&self) -> &Path {
            self.dir.path()
        }
    }

    /// Monday to next Monday: 7 calendar days, 6 weekday instants
    #[test]
    fn test_e2e_single_record() {
        let fixture = Fixture::new(
            "REQ-0001,PO Approval,2024-01-01 09:00:00\n\
             REQ-0001,President Approval,2024-01-08 09:00:00\n",
            b"REQ-0001,Research\n",
        );
        let console = fixture.run().unwrap();

        assert_eq!(
            fixture.csv(),
            format!("{HEADER_OUTPUT}2024,Research,7.0,6.0\n")
        );
        assert!(console.contains("total records: 1"));
        assert!(console.contains("years covered: [2024]"));
    }

    #[test]
    fn test_e2e_po_only_record_is_excluded() {
        let fixture = Fixture::new(
            "REQ-1,PO Approval,2024-01-01 09:00:00\n\
             REQ-1,President Approval,2024-01-08 09:00:00\n\
             REQ-2,PO Approval,2024-02-01 09:00:00\n\
             REQ-3,President Approval,2024-02-09 09:00:00\n",
            b"REQ-1,Research\nREQ-2,Research\nREQ-3,Research\n",
        );
        fixture.run().unwrap();

        assert_eq!(
            fixture.csv(),
            format!("{HEADER_OUTPUT}2024,Research,7.0,6.0\n")
        );
    }

    #[test]
    fn test_e2e_mean_of_group() {
        // 4 days (Mon -> Fri) and 6 days (Mon -> Sun)
        let fixture = Fixture::new(
            "A,PO Approval,2023-06-05 10:00:00\n\
             A,President Approval,2023-06-09 10:00:00\n\
             B,PO Approval,2023-06-12 10:00:00\n\
             B,President Approval,2023-06-18 10:00:00\n",
            b"A,Teaching\nB,Teaching\n",
        );
        fixture.run().unwrap();

        assert_eq!(
            fixture.csv(),
            format!("{HEADER_OUTPUT}2023,Teaching,5.0,5.0\n")
        );
    }

    #[test]
    fn test_e2e_rounds_to_two_decimals() {
        // 1, 2 and 2 days -> 5/3
        let fixture = Fixture::new(
            "A,PO Approval,2024-03-04 08:00:00\n\
             A,President Approval,2024-03-05 08:00:00\n\
             B,PO Approval,2024-03-04 08:00:00\n\
             B,President Approval,2024-03-06 08:00:00\n\
             C,PO Approval,2024-03-04 08:00:00\n\
             C,President Approval,2024-03-06 08:00:00\n",
            b"A,X\nB,X\nC,X\n",
        );
        fixture.run().unwrap();

        assert!(fixture.csv().ends_with("2024,X,1.67,2.67\n"));
    }

    #[test]
    fn test_e2e_latin1_program_and_sorted_output() {
        let fixture = Fixture::new(
            "R1,PO Approval,2024-01-01 09:00:00\n\
             R1,President Approval,2024-01-02 09:00:00\n\
             R2,PO Approval,2023-05-01 09:00:00\n\
             R2,President Approval,2023-05-02 09:00:00\n\
             R3,PO Approval,2024-01-01 09:00:00\n\
             R3,President Approval,2024-01-03 09:00:00\n",
            b"R1,Sant\xe9\nR2,Zoology\nR3,Arts\n",
        );
        fixture.run().unwrap();

        let csv = fixture.csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                HEADER_OUTPUT.trim_end(),
                "2023,Zoology,1.0,2.0",
                "2024,Arts,2.0,3.0",
                "2024,Santé,1.0,2.0",
            ]
        );
    }

    #[test]
    fn test_e2e_blank_po_date_kept_in_bucket() {
        // A: Mon -> Mon; B: blank PO date; C: blank president date (no year)
        let fixture = Fixture::new(
            "A,PO Approval,2024-01-01 09:00:00\n\
             A,President Approval,2024-01-08 09:00:00\n\
             B,PO Approval,\n\
             B,President Approval,2024-01-10 09:00:00\n\
             C,PO Approval,2024-01-02 09:00:00\n\
             C,President Approval,\n\
             D,PO Approval,\n\
             D,President Approval,2023-03-01 09:00:00\n",
            b"A,P\nB,P\nC,P\nD,Q\n",
        );
        fixture.run().unwrap();

        let csv = fixture.csv();
        let lines: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(lines, vec!["2023,Q,,0.0", "2024,P,7.0,3.0"]);
    }

    #[test]
    fn test_e2e_year_from_president_approval() {
        let fixture = Fixture::new(
            "R1,PO Approval,2023-12-29 09:00:00\n\
             R1,President Approval,2024-01-02 09:00:00\n",
            b"R1,Research\n",
        );
        fixture.run().unwrap();

        assert!(fixture.csv().contains("\n2024,Research,4.0,3.0\n"));
    }

    #[test]
    fn test_e2e_unmatched_program_policies() {
        let approvals = "R1,PO Approval,2024-01-01 09:00:00\n\
                         R1,President Approval,2024-01-02 09:00:00\n\
                         R9,PO Approval,2024-01-01 09:00:00\n\
                         R9,President Approval,2024-01-03 09:00:00\n";

        let fixture = Fixture::new(approvals, b"R1,Research\n");
        fixture.run().unwrap();
        let lines: Vec<String> = fixture.csv().lines().map(String::from).collect();
        assert_eq!(lines[1], "2024,,2.0,3.0");
        assert_eq!(lines[2], "2024,Research,1.0,2.0");

        let mut fixture = Fixture::new(approvals, b"R1,Research\n");
        fixture.config.processing.unmatched_program = UnmatchedProgramPolicy::Drop;
        fixture.run().unwrap();
        assert_eq!(fixture.csv().lines().count(), 2);
    }

    #[test]
    fn test_e2e_duplicate_policies() {
        let approvals = "R1,PO Approval,2024-01-01 09:00:00\n\
                         R1,PO Approval,2024-01-03 09:00:00\n\
                         R1,President Approval,2024-01-05 09:00:00\n";

        // Both PO rows pair with the president approval: (4 + 2) / 2
        let fixture = Fixture::new(approvals, b"R1,Research\n");
        fixture.run().unwrap();
        assert!(fixture.csv().contains("2024,Research,3.0,4.0"));

        let mut fixture = Fixture::new(approvals, b"R1,Research\n");
        fixture.config.processing.duplicate_policy = DuplicatePolicy::Latest;
        fixture.run().unwrap();
        assert!(fixture.csv().contains("2024,Research,2.0,3.0"));
    }

    #[test]
    fn test_e2e_out_of_order_reject() {
        let mut fixture = Fixture::new(
            "R1,PO Approval,2024-01-10 09:00:00\n\
             R1,President Approval,2024-01-05 09:00:00\n",
            b"R1,Research\n",
        );
        fixture.config.processing.out_of_order = OutOfOrderPolicy::Reject;

        let err = fixture.run().unwrap_err();
        assert!(matches!(err, ReportError::DataQuality { ref record, .. } if record == "R1"));
        assert!(!fixture.output_path().exists());
    }

    #[test]
    fn test_e2e_fixed_float_format() {
        let mut fixture = Fixture::new(
            "R1,PO Approval,2024-01-01 09:00:00\n\
             R1,President Approval,2024-01-08 09:00:00\n",
            b"R1,Research\n",
        );
        fixture.config.output.float_format = FloatFormat::Fixed;
        let console = fixture.run().unwrap();

        assert!(fixture.csv().contains("2024,Research,7.00,6.00"));
        assert!(console.contains("7.00"));
    }

    #[test]
    fn test_e2e_empty_report_still_writes_header() {
        let fixture = Fixture::new("R1,PO Approval,2024-01-01 09:00:00\n", b"R1,Research\n");
        let console = fixture.run().unwrap();

        assert_eq!(fixture.csv(), HEADER_OUTPUT);
        assert!(console.contains("total records: 0"));
        assert!(console.contains("years covered: []"));
    }

    #[test]
    fn test_e2e_missing_file() {
        let mut fixture = Fixture::new("", b"");
        fixture.config.inputs.approvals.path = fixture.dir().join("absent.csv");

        let err = fixture.run().unwrap_err();
        assert!(matches!(err, ReportError::MissingFile { .. }));
        assert!(!fixture.output_path().exists());
    }

    #[test]
    fn test_e2e_missing_column() {
        let fixture = Fixture::new("", b"");
        fs::write(
            fixture.dir().join("requests.csv"),
            "Request: Reference Number,Program\nR1,Research\n",
        )
        .unwrap();

        let err = fixture.run().unwrap_err();
        match err {
            ReportError::Schema { column, .. } => assert_eq!(column, "Top Level Primary Program"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[cfg(test)]
mod property_tests {
    use approval_engine::ApprovalEngine;
    use chrono::NaiveDate;
    use contracts::{ApprovalEvent, RequestRecord};
    use proptest::prelude::*;

    fn approval(record: &str, step: &str, year: i32, ordinal: u32) -> ApprovalEvent {
        ApprovalEvent {
            record_name: record.to_string(),
            step_name: step.to_string(),
            step_completed_date: NaiveDate::from_yo_opt(year, ordinal)
                .and_then(|d| d.and_hms_opt(9, 0, 0)),
        }
    }

    proptest! {
        #[test]
        fn report_rows_are_sorted_and_cover_every_pair(
            records in prop::collection::vec(
                (2020i32..2026, 1u32..300, 0u32..60, prop::option::of(0usize..4)),
                1..40,
            )
        ) {
            let programs = ["Arts", "Research", "Teaching", "Zoology"];
            let mut events = Vec::new();
            let mut requests = Vec::new();
            for (i, (year, start, span, program)) in records.iter().enumerate() {
                let name = format!("R{i}");
                events.push(approval(&name, "PO Approval", *year, *start));
                events.push(approval(&name, "President Approval", *year, start + span));
                requests.push(RequestRecord {
                    reference_number: name,
                    program: program.map(|p| programs[p].to_string()),
                });
            }

            let output = ApprovalEngine::default().run(&events, &requests).unwrap();
            let keys: Vec<_> = output
                .report
                .rows
                .iter()
                .map(|r| (r.year, r.program.clone()))
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));

            let counted: usize = output.report.rows.iter().map(|r| r.count).sum();
            prop_assert_eq!(counted, records.len());
            for row in &output.report.rows {
                let avg_days = row.avg_days.unwrap_or_default();
                prop_assert!(row.avg_days.is_some());
                prop_assert!(avg_days >= 0.0);
                prop_assert!(row.avg_business_days <= avg_days + 1.01);
            }
        }
    }
}
