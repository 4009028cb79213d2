#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

fn cfn_sub_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("cfn-sub").unwrap();
	cmd.env("CFNSUB_NO_USER_CONFIG", "1").env("NO_COLOR", "1");
	cmd
}

fn write_json(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
	let path = dir.join(name);
	fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
	path
}

fn bucket_template() -> Value {
	json!({
		"Resources": {
			"Bucket": {
				"Type": "AWS::S3::Bucket",
				"Properties": { "BucketName": "my-#{Env}-bucket" }
			}
		},
		"Outputs": {
			"Arn": { "Value": { "Fn::Sub": "arn:aws:s3:::#{Env}-#{AWS::Region}" } }
		}
	})
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	cfn_sub_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Fn::Sub expressions"));
}

#[test]
fn test_version_flag() {
	cfn_sub_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("cfn-sub"));
}

#[test]
fn test_no_args_shows_help() {
	cfn_sub_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".cfnsub.toml");

	cfn_sub_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .cfnsub.toml"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("prefix = \"#{\""));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".cfnsub.toml"), "# existing").unwrap();

	cfn_sub_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".cfnsub.toml");
	fs::write(&config_path, "# existing").unwrap();

	cfn_sub_cmd()
		.args(["--init", "--force"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
}

// ============================================================================
// rewrite tests
// ============================================================================

#[test]
fn test_rewrite_json_to_stdout() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(temp_dir.path(), "stack.json", &bucket_template());

	let assert = cfn_sub_cmd()
		.arg(&input)
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stderr(predicate::str::contains(
			r#"'my-#{Env}-bucket' => '{"Fn::Sub":"my-${Env}-bucket"}'"#,
		))
		.stderr(predicate::str::contains(
			"'arn:aws:s3:::#{Env}-#{AWS::Region}' => 'arn:aws:s3:::${Env}-${AWS::Region}'",
		))
		.stderr(predicate::str::contains("2 values converted"));

	let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
	assert_eq!(
		output,
		json!({
			"Resources": {
				"Bucket": {
					"Type": "AWS::S3::Bucket",
					"Properties": { "BucketName": { "Fn::Sub": "my-${Env}-bucket" } }
				}
			},
			"Outputs": {
				"Arn": { "Value": { "Fn::Sub": "arn:aws:s3:::${Env}-${AWS::Region}" } }
			}
		})
	);

	// Input is left alone when writing to stdout
	let original: Value = serde_json::from_str(&fs::read_to_string(&input).unwrap()).unwrap();
	assert_eq!(original, bucket_template());
}

#[test]
fn test_rewrite_preserves_key_order() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = temp_dir.path().join("stack.json");
	fs::write(&input, r##"{"Zeta": "#{Z}", "Alpha": "plain"}"##).unwrap();

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--compact", "--quiet"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout("{\"Zeta\":{\"Fn::Sub\":\"${Z}\"},\"Alpha\":\"plain\"}\n")
		.stderr(predicate::str::is_empty());
}

#[test]
fn test_rewrite_yaml_in_place() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = temp_dir.path().join("serverless-stack.yml");
	fs::write(
		&input,
		"Resources:\n  Queue:\n    Properties:\n      QueueName: '#{Stage}-jobs'\n      DelaySeconds: 5\n",
	)
	.unwrap();

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--in-place"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::is_empty());

	let rewritten: Value = serde_yaml::from_str(&fs::read_to_string(&input).unwrap()).unwrap();
	assert_eq!(
		rewritten,
		json!({
			"Resources": {
				"Queue": {
					"Properties": {
						"QueueName": { "Fn::Sub": "${Stage}-jobs" },
						"DelaySeconds": 5
					}
				}
			}
		})
	);
}

#[test]
fn test_rewrite_to_output_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(temp_dir.path(), "stack.json", &bucket_template());
	let output = temp_dir.path().join("out.json");

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let rewritten: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
	assert_eq!(
		rewritten["Resources"]["Bucket"]["Properties"]["BucketName"],
		json!({ "Fn::Sub": "my-${Env}-bucket" })
	);
}

#[test]
fn test_second_run_is_noop() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(temp_dir.path(), "stack.json", &bucket_template());

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--in-place"])
		.current_dir(temp_dir.path())
		.assert()
		.success();
	let first = fs::read_to_string(&input).unwrap();

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--in-place"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stderr(predicate::str::contains("0 values converted"));

	assert_eq!(fs::read_to_string(&input).unwrap(), first);
}

#[test]
fn test_dry_run_writes_nothing() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(temp_dir.path(), "stack.json", &bucket_template());
	let before = fs::read_to_string(&input).unwrap();

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--dry-run"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("2 values converted"));

	assert_eq!(fs::read_to_string(&input).unwrap(), before);
}

#[test]
fn test_custom_delimiter_flags() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(
		temp_dir.path(),
		"stack.json",
		&json!({ "Name": "<<Env>>-bucket", "Sub": { "Fn::Sub": "<<Env>>-bucket" } }),
	);

	let assert = cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--prefix", "<<", "--suffix", ">>"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
	assert_eq!(
		output,
		json!({
			"Name": { "Fn::Sub": "${Env}-bucket" },
			"Sub": { "Fn::Sub": "${Env}-bucket" }
		})
	);
}

#[test]
fn test_delimiters_from_config_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".cfnsub.toml"),
		"root = true\nprefix = \"$[\"\nsuffix = \"]\"\n",
	)
	.unwrap();
	let input = write_json(
		temp_dir.path(),
		"stack.json",
		&json!({ "Name": "$[Env]-#{Other}" }),
	);

	let assert = cfn_sub_cmd()
		.arg(&input)
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
	assert_eq!(output, json!({ "Name": { "Fn::Sub": "${Env}-#{Other}" } }));
}

#[test]
fn test_empty_delimiter_fails_fast() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(temp_dir.path(), "stack.json", &bucket_template());

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--suffix", ""])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("suffix must not be empty"));
}

#[test]
fn test_unknown_format_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = temp_dir.path().join("stack.txt");
	fs::write(&input, "{}").unwrap();

	cfn_sub_cmd()
		.arg(&input)
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("--format"));

	cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--format", "json"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("{}"));
}

#[test]
fn test_missing_template_fails() {
	let temp_dir = tempfile::tempdir().unwrap();

	cfn_sub_cmd()
		.arg("missing.json")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to load template"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	cfn_sub_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".cfnsub.toml"),
		"root = true\nprefix = \"<<\"\nsuffix = \">>\"\n",
	)
	.unwrap();

	cfn_sub_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_invalid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".cfnsub.toml"),
		"root = true\nprefix = [\"not\", \"a\", \"string\"]\n",
	)
	.unwrap();

	cfn_sub_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_show_reports_sources() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".cfnsub.toml"),
		"root = true\nprefix = \"<<\"\n",
	)
	.unwrap();

	cfn_sub_cmd()
		.args(["config", "show"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("# prefix: <<"))
		.stdout(predicate::str::contains("prefix: << ("))
		.stdout(predicate::str::contains("suffix: } (default)"));
}

#[test]
fn test_config_show_with_override() {
	let temp_dir = tempfile::tempdir().unwrap();

	cfn_sub_cmd()
		.args(["config", "show", "--suffix", ">>"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"))
		.stdout(predicate::str::contains("suffix: >> (command line)"));
}

#[test]
fn test_config_validate_rejects_empty_override() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".cfnsub.toml"),
		"root = true\nsuffix = \">>\"\n",
	)
	.unwrap();

	cfn_sub_cmd()
		.args(["config", "validate", "--prefix", ""])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"))
		.stderr(predicate::str::contains("prefix must not be empty"));
}

// ============================================================================
// delimiter and output edge cases
// ============================================================================

#[test]
fn test_hyphen_leading_delimiter_flags() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(
		temp_dir.path(),
		"stack.json",
		&json!({ "Name": "-[Env]-bucket" }),
	);

	let assert = cfn_sub_cmd()
		.args([input.to_str().unwrap(), "--prefix", "-[", "--suffix", "]"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
	assert_eq!(output, json!({ "Name": { "Fn::Sub": "${Env}-bucket" } }));
}

#[test]
fn test_yaml_short_form_sub_not_double_wrapped() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = temp_dir.path().join("stack.yaml");
	fs::write(
		&input,
		"Outputs:\n  Name:\n    Value: !Sub '#{Env}-x'\n  Bucket:\n    Value: !Ref DataBucket\n",
	)
	.unwrap();

	let assert = cfn_sub_cmd()
		.arg(&input)
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stderr(predicate::str::contains("'#{Env}-x' => '${Env}-x'"));

	let output: Value = serde_yaml::from_slice(&assert.get_output().stdout).unwrap();
	assert_eq!(
		output,
		json!({
			"Outputs": {
				"Name": { "Value": { "Fn::Sub": "${Env}-x" } },
				"Bucket": { "Value": { "Ref": "DataBucket" } }
			}
		})
	);
}

#[test]
fn test_report_uncolored_when_stderr_redirected() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = write_json(temp_dir.path(), "stack.json", &bucket_template());

	let mut cmd = assert_cmd::Command::cargo_bin("cfn-sub").unwrap();
	cmd.env("CFNSUB_NO_USER_CONFIG", "1")
		.env_remove("NO_COLOR")
		.env("CLICOLOR_FORCE", "1");

	cmd.args([input.to_str().unwrap(), "--dry-run"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stderr(predicate::str::contains("2 values converted"))
		.stderr(predicate::str::contains("\u{1b}[").not());
}
