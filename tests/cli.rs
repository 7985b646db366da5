use assert_cmd::Command;
use predicates::prelude::*;

use std::fs::read;

const SAM_HEADER: &str = "READ\tCHROM\tPOS\tPRIMERID\tPRELEFT\tLEFTPRIMER\tSEQUENCE\tRIGHTPRIMER\tPOSTRIGHT\tUMI\tPRIMER.ORIENTATION\tREAD.ORIENTATION\tSEQ\n";
const BASIC_HEADER: &str = "READ\tPRIMERID\tPRELEFT\tLEFTPRIMER\tSEQUENCE\tRIGHTPRIMER\tPOSTRIGHT\tUMI\tPRIMER.ORIENTATION\n";

fn exact_sam_report() -> String {
    [
        SAM_HEADER,
        "R1\tchr1\t100\t0\tGG\tCCCC\tTTTT\tAAAA\tGG\tGG\t+\t+\tGGCCCCTTTTAAAAGG\n",
        "R3\tchr2\t300\t0\tGG\tCCCC\tTTTT\tAAAA\tGG\tCC\t-\t-\tCCTTTTAAAAGGGGCC\n",
    ]
    .concat()
}

fn primerscan() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

#[test]
fn fail_without_arguments() {
    primerscan().assert().failure();
}

#[test]
fn success_when_printing_help() {
    primerscan().arg("--help").assert().success();
}

#[test]
fn exact_from_file() {
    primerscan()
        .args(["tests/data/primers.txt", "-r", "tests/data/reads.sam"])
        .assert()
        .success()
        .stdout(predicate::str::diff(exact_sam_report()));
}

#[test]
fn exact_from_stdin() {
    let reads = read("tests/data/reads.sam").unwrap();

    primerscan()
        .args(["tests/data/primers.txt", "--reads", "-"])
        .write_stdin(reads.clone())
        .assert()
        .success()
        .stdout(predicate::str::diff(exact_sam_report()));

    primerscan()
        .arg("tests/data/primers.txt")
        .write_stdin(reads)
        .assert()
        .success()
        .stdout(predicate::str::diff(exact_sam_report()));
}

#[test]
fn exact_from_gzip() {
    primerscan()
        .args(["tests/data/primers.txt", "-r", "tests/data/reads.sam.gz"])
        .assert()
        .success()
        .stdout(predicate::str::diff(exact_sam_report()));
}

#[test]
fn exact_basic_schema() {
    let expected = [
        BASIC_HEADER,
        "R1\t0\tGG\tCCCC\tTTTT\tAAAA\tGG\tGG\t+\n",
        "R3\t0\tGG\tCCCC\tTTTT\tAAAA\tGG\tCC\t-\n",
    ]
    .concat();

    primerscan()
        .args(["tests/data/primers.txt", "-r", "tests/data/reads.sam", "--schema", "basic"])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn approx_from_config() {
    let expected = [
        BASIC_HEADER,
        "R1\t0\tGG\tCCCC\tTTTT\tAAAA\tGG\tGG\t+\n",
        "R3\t0\tCC\tTTTT\tAAAA\tGGGG\tCC\tCC\t-\n",
        "R4\t1\tACGTA\tGGATCGTTAG\tCCCCCC\tACGTAGCAAC\tTTT\tGTA\t+\n",
    ]
    .concat();

    primerscan()
        .args([
            "tests/data/primers.txt",
            "-r",
            "tests/data/reads.sam",
            "--config",
            "tests/data/approx.yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn flags_override_config() {
    primerscan()
        .args([
            "tests/data/primers.txt",
            "-r",
            "tests/data/reads.sam",
            "--config",
            "tests/data/approx.yaml",
            "--strategy",
            "exact",
            "--schema",
            "sam",
            "--umi-len",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff(exact_sam_report()));
}

#[test]
fn missing_primer_file() {
    primerscan()
        .args(["tests/data/no_such_primers.txt", "-r", "tests/data/reads.sam"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no_such_primers.txt"));
}

#[test]
fn malformed_primer_file() {
    primerscan()
        .args(["tests/data/bad_primers.txt", "-r", "tests/data/reads.sam"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_reads_file() {
    primerscan()
        .args(["tests/data/primers.txt", "-r", "tests/data/no_such_reads.sam"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn truncated_read_line() {
    let expected = [
        SAM_HEADER,
        "R1\tchr1\t100\t0\tGG\tCCCC\tTTTT\tAAAA\tGG\tGG\t+\t+\tGGCCCCTTTTAAAAGG\n",
    ]
    .concat();

    primerscan()
        .args(["tests/data/primers.txt", "-r", "tests/data/truncated.sam"])
        .assert()
        .failure()
        .stdout(predicate::str::diff(expected))
        .stderr(predicate::str::contains("line 2"));
}
