//! Greedy word wrapping for node labels.

/// Packs words into lines so that no line's measured width exceeds `budget`.
/// `measure` reports the rendered pixel width of a candidate line, which lets
/// the renderer plug in canvas text metrics while tests use a synthetic ruler.
///
/// A single word wider than the budget gets a line of its own, unsplit.
pub fn wrap<F>(text: &str, budget: f64, measure: F) -> Vec<String>
where
	F: Fn(&str) -> f64,
{
	let mut lines = Vec::new();
	let mut line = String::new();
	for word in text.split_whitespace() {
		if line.is_empty() {
			line.push_str(word);
			continue;
		}
		let candidate = format!("{line} {word}");
		if measure(&candidate) <= budget {
			line = candidate;
		} else {
			lines.push(std::mem::take(&mut line));
			line.push_str(word);
		}
	}
	if !line.is_empty() {
		lines.push(line);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;

	// 10px per character, a stand-in for canvas metrics.
	fn ruler(s: &str) -> f64 {
		s.chars().count() as f64 * 10.0
	}

	#[test]
	fn short_label_stays_on_one_line() {
		assert_eq!(wrap("hotel Active", 120.0, ruler), vec!["hotel Active"]);
	}

	#[test]
	fn no_line_exceeds_budget() {
		let lines = wrap("restaurant Request food and price", 120.0, ruler);
		assert!(lines.len() > 1);
		for line in &lines {
			assert!(ruler(line) <= 120.0, "line {line:?} over budget");
		}
	}

	#[test]
	fn oversized_word_gets_its_own_line_unsplit() {
		let lines = wrap("go multi_domain_hotel_restaurant now", 120.0, ruler);
		assert_eq!(
			lines,
			vec!["go", "multi_domain_hotel_restaurant", "now"]
		);
	}

	#[test]
	fn whitespace_only_yields_no_lines() {
		assert!(wrap("   ", 120.0, ruler).is_empty());
		assert!(wrap("", 120.0, ruler).is_empty());
	}

	#[test]
	fn words_are_never_reordered_or_dropped() {
		let text = "multi domain hotel restaurant transition";
		let lines = wrap(text, 150.0, ruler);
		assert_eq!(lines.join(" "), text);
	}
}
