use rand::Rng;

const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

fn transliterate(c: char) -> Option<char> {
    let mapped = match c {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'İ' | 'î' | 'Î' => 'i',
        'ö' | 'Ö' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' | 'û' | 'Û' => 'u',
        'â' | 'Â' => 'a',
        _ => return None,
    };
    Some(mapped)
}

/// URL-friendly form of a title: lowercase ASCII words joined by single hyphens.
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    let lowered = text.chars().flat_map(|c| match transliterate(c) {
        Some(ascii) => vec![ascii],
        None => c.to_lowercase().collect(),
    });

    for c in lowered {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        }
        // anything else is dropped without breaking the word
    }

    slug
}

/// `generate_slug` plus a random base-36 suffix so identical titles still
/// get distinct slugs.
pub fn generate_unique_slug(text: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    let base = generate_slug(text);
    if base.is_empty() {
        suffix
    } else {
        format!("{}-{}", base, suffix)
    }
}
