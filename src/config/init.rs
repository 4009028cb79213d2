/// Template written by `cfn-sub --init`.
pub fn generate_init_template() -> String {
	format!(
		r##"# cfn-sub configuration
#
# Placeholders of the form <prefix>Name<suffix> found in template strings are
# rewritten into CloudFormation Fn::Sub expressions (${{Name}}).

# Stop looking for .cfnsub.toml files in parent directories.
root = true

# Placeholder delimiters. Both default to the values shown.
prefix = "{prefix}"
suffix = "{suffix}"
"##,
		prefix = super::types::DEFAULT_PREFIX,
		suffix = super::types::DEFAULT_SUFFIX,
	)
}
