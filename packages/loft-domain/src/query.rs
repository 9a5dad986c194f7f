use unicode_normalization::UnicodeNormalization;

pub const MIN_TOKEN_CHARS: usize = 3;

/// Words that carry no retrieval signal in a file request ("can you find the ...").
pub const STOPWORDS: &[&str] = &[
	"about", "all", "also", "and", "any", "are", "can", "could", "did", "does", "find", "for",
	"from", "get", "give", "had", "has", "have", "her", "here", "his", "how", "into", "its",
	"just", "look", "looking", "need", "not", "our", "please", "search", "show", "some", "that",
	"the", "their", "them", "then", "there", "these", "they", "this", "those", "want", "was",
	"were", "what", "when", "where", "which", "who", "why", "with", "would", "you", "your",
];

/// Normalizes a free-text query into search tokens.
///
/// Words are lowercased, split on any run of non-alphanumeric characters, and singularized by
/// dropping one trailing `s`. Tokens shorter than [`MIN_TOKEN_CHARS`] and stopwords are removed.
/// When nothing survives, the unfiltered words are returned instead, so the result is empty only
/// for queries without alphanumeric content.
///
/// The singularization is deliberately naive: `"is"` becomes `"i"` and `"glass"` becomes
/// `"glas"`.
pub fn tokenize(query: &str) -> Vec<String> {
	let normalized: String = query.nfkc().flat_map(char::to_lowercase).collect();
	let words: Vec<&str> =
		normalized.split(|ch: char| !ch.is_alphanumeric()).filter(|word| !word.is_empty()).collect();
	let mut tokens = Vec::with_capacity(words.len());

	for word in &words {
		let singular = singularize(word);

		if singular.chars().count() < MIN_TOKEN_CHARS {
			continue;
		}
		if is_stopword(word) || is_stopword(singular) {
			continue;
		}

		push_unique(&mut tokens, singular);
	}

	if tokens.is_empty() {
		for word in words {
			push_unique(&mut tokens, word);
		}
	}

	tokens
}

/// The longest token, earliest on ties.
pub fn primary_token(tokens: &[String]) -> Option<&str> {
	let mut best: Option<&str> = None;

	for token in tokens {
		let longer = best.map(|current| token.chars().count() > current.chars().count());

		if longer.unwrap_or(true) {
			best = Some(token.as_str());
		}
	}

	best
}

pub fn is_stopword(word: &str) -> bool {
	STOPWORDS.contains(&word)
}

fn singularize(word: &str) -> &str {
	word.strip_suffix('s').unwrap_or(word)
}

fn push_unique(tokens: &mut Vec<String>, token: &str) {
	if !tokens.iter().any(|existing| existing == token) {
		tokens.push(token.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_splits_and_singularizes() {
		assert_eq!(tokenize("Mobile-App  ICONS, v2!"), vec!["mobile", "app", "icon"]);
	}

	#[test]
	fn keeps_mockup_intact() {
		assert_eq!(tokenize("ORCA dashboard mockup"), vec!["orca", "dashboard", "mockup"]);
	}

	#[test]
	fn drops_stopwords_and_short_words() {
		assert_eq!(tokenize("can you find the logo for me"), vec!["logo"]);
	}

	#[test]
	fn stopword_match_uses_the_unstripped_word() {
		assert_eq!(tokenize("this banner"), vec!["banner"]);
	}

	#[test]
	fn naive_singularization_is_preserved() {
		assert_eq!(tokenize("glass"), vec!["glas"]);
		assert_eq!(tokenize("is ui ok"), vec!["is", "ui", "ok"]);
	}

	#[test]
	fn falls_back_to_unfiltered_words() {
		assert_eq!(tokenize("the and"), vec!["the", "and"]);
		assert_eq!(tokenize("UI / UX"), vec!["ui", "ux"]);
	}

	#[test]
	fn non_alphanumeric_query_has_no_tokens() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" -- !! ?? ").is_empty());
	}

	#[test]
	fn repeated_words_collapse() {
		assert_eq!(tokenize("logos logo LOGO"), vec!["logo"]);
	}

	#[test]
	fn fullwidth_text_is_normalized() {
		assert_eq!(tokenize("ＯＲＣＡ"), vec!["orca"]);
	}

	#[test]
	fn primary_token_prefers_longest_then_earliest() {
		let tokens = vec!["orca".to_string(), "mockup".to_string(), "banner".to_string()];

		assert_eq!(primary_token(&tokens), Some("mockup"));
		assert_eq!(primary_token(&[]), None);
	}
}
