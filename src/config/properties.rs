//! Default [`ConfigLoader`] reading Java-style `.properties` files.

// std
use std::{fs, path::Path};
// self
use crate::{
	_prelude::*,
	config::{ConfigLoader, ConfigSource},
};

/// Loads `key=value` property files from the local filesystem.
///
/// Supported syntax: `=` or `:` separators (or the first run of whitespace), `#` and `!`
/// comment lines, blank lines, and line continuations (a line ending in an odd number of
/// backslashes). Backslash escapes follow the Java format: `\t`, `\n`, `\r`, `\f`,
/// `\uXXXX`, and any other escaped character standing for itself (so `\:`, `\=`, `\ `, and
/// `\\` are literal). Surrounding whitespace is dropped unless escaped; a repeated key keeps
/// its last value. A file without any property yields `Ok(None)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertiesFileLoader;
impl PropertiesFileLoader {
	/// Parses properties from an in-memory string.
	pub fn parse(contents: &str) -> ConfigSource {
		let mut properties = Vec::new();
		let mut pending = String::new();

		for raw in contents.lines() {
			let line = raw.trim_start();

			if pending.is_empty() && (line.is_empty() || line.starts_with(['#', '!'])) {
				continue;
			}
			if trailing_backslashes(line) % 2 == 1 {
				pending.push_str(&line[..line.len() - 1]);

				continue;
			}

			pending.push_str(line);

			if let Some(entry) = split_entry(&pending) {
				properties.push(entry);
			}

			pending.clear();
		}

		if let Some(entry) = split_entry(&pending) {
			properties.push(entry);
		}

		properties.into_iter().collect()
	}

	/// Reads and parses the file at `path`.
	pub fn read(path: impl AsRef<Path>) -> Result<Option<ConfigSource>, BoxError> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path)
			.map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
		let source = Self::parse(&contents);

		Ok((!source.is_empty()).then_some(source))
	}
}
impl ConfigLoader for PropertiesFileLoader {
	fn load(&self, location: &str) -> Result<Option<ConfigSource>, BoxError> {
		Self::read(location)
	}
}

fn trailing_backslashes(text: &str) -> usize {
	text.bytes().rev().take_while(|b| *b == b'\\').count()
}

fn split_entry(line: &str) -> Option<(String, String)> {
	let line = line.trim_start();

	if line.is_empty() {
		return None;
	}

	let mut escaped = false;
	let mut key_end = line.len();

	for (idx, c) in line.char_indices() {
		if escaped {
			escaped = false;
		} else if c == '\\' {
			escaped = true;
		} else if c == '=' || c == ':' || c.is_whitespace() {
			key_end = idx;

			break;
		}
	}

	let (key, rest) = line.split_at(key_end);

	if key.is_empty() {
		return None;
	}

	let rest = rest.trim_start();
	let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest).trim_start();
	let trimmed = rest.trim_end();
	// An escaped trailing space survives the trim.
	let value = if trailing_backslashes(trimmed) % 2 == 1 {
		let kept = rest[trimmed.len()..].chars().next().map_or(0, char::len_utf8);

		&rest[..trimmed.len() + kept]
	} else {
		trimmed
	};

	Some((unescape(key), unescape(value)))
}

fn unescape(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	let mut chars = raw.chars();

	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);

			continue;
		}

		match chars.next() {
			Some('t') => out.push('\t'),
			Some('n') => out.push('\n'),
			Some('r') => out.push('\r'),
			Some('f') => out.push('\u{c}'),
			Some('u') => {
				let decoded = chars
					.as_str()
					.get(..4)
					.filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
					.and_then(|hex| u32::from_str_radix(hex, 16).ok())
					.and_then(char::from_u32);

				match decoded {
					Some(decoded) => {
						out.push(decoded);
						chars.nth(3);
					},
					None => out.push('u'),
				}
			},
			Some(other) => out.push(other),
			None => {},
		}
	}

	out
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// self
	use super::*;
	use crate::config::{CLIENT_ID, CLIENT_SECRET, LOGIN_MFA_URL, LOGIN_URL};

	const SAMPLE: &str = "\
# management login
mgmt.login.url=https://login.example.com/oauth/token
mgmt.login.mfa.url = https://login.example.com/oauth/token?mfa_token=
! client pair
mgmt.login.client.id: edgecli
mgmt.login.client.secret   edgeclisecret

";

	#[test]
	fn parses_all_separator_styles() {
		let source = PropertiesFileLoader::parse(SAMPLE);

		assert_eq!(source.len(), 4);
		assert_eq!(source.get(LOGIN_URL), Some("https://login.example.com/oauth/token"));
		assert_eq!(
			source.get(LOGIN_MFA_URL),
			Some("https://login.example.com/oauth/token?mfa_token=")
		);
		assert_eq!(source.get(CLIENT_ID), Some("edgecli"));
		assert_eq!(source.get(CLIENT_SECRET), Some("edgeclisecret"));
	}

	#[test]
	fn joins_continuations_and_keeps_last_duplicate() {
		let source = PropertiesFileLoader::parse(
			"mgmt.login.url=https://login.example.com/\\\n    oauth/token\nmgmt.login.url=https://override.example.com/token\nmgmt.login.client.id=\\\n  split",
		);

		assert_eq!(source.get(LOGIN_URL), Some("https://override.example.com/token"));
		assert_eq!(source.get(CLIENT_ID), Some("split"));
	}

	#[test]
	fn unescapes_java_written_values() {
		let source = PropertiesFileLoader::parse(
			"mgmt.login.url=https\\://login.example.com/oauth/token\nmgmt.login.client\\.id=edge\\=cli\nmgmt.login.client.secret=\\u0073ecret\\ \n",
		);

		assert_eq!(source.get(LOGIN_URL), Some("https://login.example.com/oauth/token"));
		assert_eq!(source.get(CLIENT_ID), Some("edge=cli"));
		assert_eq!(source.get(CLIENT_SECRET), Some("secret "));
	}

	#[test]
	fn escaped_trailing_backslash_does_not_continue_the_line() {
		let source = PropertiesFileLoader::parse("a=C:\\\\\nb=2\nc=x\\\\\\\n  y\n");

		assert_eq!(source.get("a"), Some("C:\\"));
		assert_eq!(source.get("b"), Some("2"));
		assert_eq!(source.get("c"), Some("x\\y"));
	}

	#[test]
	fn escaped_separators_stay_in_the_key() {
		let source = PropertiesFileLoader::parse("odd\\ key\\:name = value\n");

		assert_eq!(source.get("odd key:name"), Some("value"));
	}

	#[test]
	fn comment_only_file_loads_nothing() {
		assert!(PropertiesFileLoader::parse("# nothing\n\n! here\n").is_empty());
	}

	#[test]
	fn reads_files_through_the_loader_contract() {
		let path = env::temp_dir().join(format!("mgmt-token-client-{}.properties", process::id()));

		fs::write(&path, SAMPLE).expect("Failed to write properties fixture.");

		let loaded = PropertiesFileLoader
			.load(&path.to_string_lossy())
			.expect("Properties fixture should load.")
			.expect("Properties fixture should not be empty.");

		assert_eq!(loaded.get(CLIENT_ID), Some("edgecli"));

		let _ = fs::remove_file(&path);
		let err = PropertiesFileLoader
			.load(&path.to_string_lossy())
			.expect_err("Missing file should fail to load.");

		assert!(err.to_string().starts_with("Failed to read"));
	}
}
