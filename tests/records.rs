use revp_kmer_indexer::*;
use std::io::Write;

fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn test_read_fasta_uppercases() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "in.fa",
        ">rosalind_24 sample\nTCAATGCATGCGGGTCTATATGCAT\n>second\ngaat\ntc\n",
    );
    let recs = read_records(&path).unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].id, "rosalind_24");
    assert_eq!(recs[0].seq, b"TCAATGCATGCGGGTCTATATGCAT".to_vec());
    assert_eq!(recs[1].seq, b"GAATTC".to_vec());
}

#[test]
fn test_read_fastq_and_gzip() {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reads.fq.gz");
    let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    enc.write_all(b"@r1\nGGATCC\n+\nIIIIII\n@r2\nacgt\n+\nIIII\n")
        .unwrap();
    enc.finish().unwrap();

    let recs = read_records(&path).unwrap();
    assert_eq!(
        recs,
        vec![
            SequenceRecord::new("r1", "GGATCC"),
            SequenceRecord::new("r2", "ACGT"),
        ]
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_records(&dir.path().join("absent.fa")).is_err());
}

#[test]
fn test_locate_records_keeps_order_and_skips_short() {
    let records = vec![
        SequenceRecord::new("a", "GAATTC"),
        SequenceRecord::new("tiny", "AT"),
        SequenceRecord::new("b", "TCAATGCATGCGGGTCTATATGCAT"),
        SequenceRecord::new("c", "AAAAAAA"),
    ];
    let cfg = ScanConfig::default().min_record_len(4).threads(2);
    let out = locate_records(&records, &cfg).unwrap();
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(out[0].match_count(), 2);
    assert_eq!(out[1].match_count(), 8);
    assert_eq!(out[1].hits, locate(&records[2].seq, 4, 12).unwrap());
    assert!(out[2].hits.is_empty());
}

#[test]
fn test_locate_records_names_failing_record() {
    let records = vec![
        SequenceRecord::new("ok", "GAATTC"),
        SequenceRecord::new("bad", "GANTC"),
    ];
    let err = locate_records(&records, &ScanConfig::default()).unwrap_err();
    match err {
        LocateError::Record { id, source } => {
            assert_eq!(id, "bad");
            assert!(matches!(*source, LocateError::Pairing(_)));
        }
        other => panic!("unexpected error: {other}"),
    }

    // the same record passes with the IUPAC alphabet
    let cfg = ScanConfig::default().alphabet(Alphabet::Iupac).min_len(5).max_len(6);
    let out = locate_records(&records, &cfg).unwrap();
    assert_eq!(out[1].hits.get(&0), Some(&vec![5]));
}

#[test]
fn test_invalid_config_rejected_before_scanning() {
    let records = vec![SequenceRecord::new("a", "GAATTC")];
    let cfg = ScanConfig::default().min_len(8).max_len(6);
    assert!(matches!(
        locate_records(&records, &cfg),
        Err(LocateError::InvalidBounds { min_len: 8, max_len: 6 })
    ));
}

#[test]
fn test_tsv_report() {
    let one = locate_records(
        &[SequenceRecord::new("s", "TCAATGCATGCGGGTCTATATGCAT")],
        &ScanConfig::default(),
    )
    .unwrap();
    let mut buf = Vec::new();
    ReportWriter::new(&one).write(&mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "4\t6\n5\t4\n6\t6\n7\t4\n17\t4\n18\t4\n20\t6\n21\t4\n"
    );

    let two = locate_records(
        &[
            SequenceRecord::new("x", "ACGT"),
            SequenceRecord::new("y", "GGCC"),
        ],
        &ScanConfig::default(),
    )
    .unwrap();
    let mut buf = Vec::new();
    ReportWriter::new(&two)
        .format(ReportFormat::Tsv)
        .write(&mut buf)
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "x\t1\t4\ny\t1\t4\n");
}

#[test]
fn test_tsv_record_ids_survive_skipped_records() {
    let records = vec![
        SequenceRecord::new("tiny", "AT"),
        SequenceRecord::new("x", "ACGT"),
    ];
    let out = locate_records(&records, &ScanConfig::default().min_record_len(4)).unwrap();
    assert_eq!(out.len(), 1);

    let mut buf = Vec::new();
    ReportWriter::new(&out)
        .record_ids(records.len() > 1)
        .write(&mut buf)
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "x\t1\t4\n");

    let mut buf = Vec::new();
    ReportWriter::new(&out).write(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "1\t4\n");
}

#[test]
fn test_json_report_to_file() {
    let results = locate_records(
        &[SequenceRecord::new("s1", "AGAATTCT")],
        &ScanConfig::default().max_len(8),
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    ReportWriter::new(&results)
        .format(ReportFormat::Json)
        .write_to(&path)
        .unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc[0]["id"], "s1");
    assert_eq!(doc[0]["len"], 8);
    let matches = doc[0]["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0]["start"], 0);
    assert_eq!(matches[0]["len"], 8);
    assert_eq!(matches[2]["start"], 2);
    assert_eq!(matches[2]["len"], 4);
}
