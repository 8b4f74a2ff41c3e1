use anyhow::{bail, Context};
use rsrcfork::{Resource, ResourceFork, Source, TypeCode};

use crate::app::ForkArgs;

/// Decode the fork selected by `args`.
pub fn load_fork(args: &ForkArgs) -> anyhow::Result<ResourceFork> {
    let source = if args.data_fork {
        Source::DataFork(&args.path)
    } else {
        Source::ResourceFork(&args.path)
    };

    ResourceFork::from_source(source)
        .with_context(|| format!("failed to read resource fork: {}", args.path.display()))
}

/// Resolve the `--type` filter of `args`, if any.
pub fn type_filter(args: &ForkArgs) -> anyhow::Result<Option<TypeCode>> {
    args.type_code.as_deref().map(parse_type_code).transpose()
}

/// Resources of `fork` that pass the optional type filter, in on-disk order.
pub fn select<'a>(
    fork: &'a ResourceFork,
    type_code: Option<TypeCode>,
) -> impl Iterator<Item = &'a Resource> {
    fork.iter()
        .filter(move |resource| type_code.map_or(true, |code| resource.type_code() == code))
}

/// Parse a type code in the form [`TypeCode::printable_form`] produces.
///
/// Accepts `\\` and `\xHH` escapes. Codes shorter than four bytes are padded with spaces, as
/// `STR ` is usually typed `STR`.
pub fn parse_type_code(text: &str) -> anyhow::Result<TypeCode> {
    let mut bytes = Vec::with_capacity(4);
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        let byte = match c {
            '\\' => match chars.next() {
                Some('\\') => b'\\',
                Some('x') => {
                    let hex: String = chars.by_ref().take(2).collect();
                    if hex.len() != 2 {
                        bail!("incomplete escape in type code '{text}'");
                    }
                    u8::from_str_radix(&hex, 16)
                        .with_context(|| format!("invalid escape in type code '{text}'"))?
                }
                _ => bail!("invalid escape in type code '{text}'"),
            },
            c if c.is_ascii() => c as u8,
            _ => bail!("type code '{text}' contains a non-ASCII character, use \\xHH"),
        };
        bytes.push(byte);
    }

    if bytes.is_empty() || bytes.len() > 4 {
        bail!("type code '{text}' must be one to four bytes long");
    }
    bytes.resize(4, b' ');

    let mut code = [0u8; 4];
    code.copy_from_slice(&bytes);
    Ok(TypeCode::new(code))
}

/// Lowercase names of the attribute bits set on `resource`, with unknown bits in hex.
pub fn attribute_names(resource: &Resource) -> Vec<String> {
    let flags = resource.flags();
    let mut names: Vec<String> = flags
        .iter_names()
        .map(|(name, _)| name.to_lowercase())
        .collect();

    let unknown = resource.attributes() & !rsrcfork::ResourceAttributes::all().bits();
    if unknown != 0 {
        names.push(format!("0x{unknown:02x}"));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_padded_codes() {
        assert_eq!(parse_type_code("CODE").unwrap(), TypeCode::new(*b"CODE"));
        assert_eq!(parse_type_code("STR").unwrap(), TypeCode::new(*b"STR "));
        assert_eq!(parse_type_code("STR#").unwrap(), TypeCode::new(*b"STR#"));
    }

    #[test]
    fn escaped_codes_match_printable_form() {
        let code = TypeCode::new([0x00, b'\\', 0xA9, b'A']);
        assert_eq!(parse_type_code(&code.printable_form()).unwrap(), code);
    }

    #[test]
    fn rejected_codes() {
        assert!(parse_type_code("").is_err());
        assert!(parse_type_code("TOOLONG").is_err());
        assert!(parse_type_code("\\q").is_err());
        assert!(parse_type_code("\\x4").is_err());
        assert!(parse_type_code("\\xZZ").is_err());
        assert!(parse_type_code("ICN©").is_err());
    }

    #[test]
    fn attribute_names_keep_unknown_bits() {
        let resource = Resource::new(TypeCode::new(*b"CODE"), 1, None, 0xB0, Vec::new());
        assert_eq!(attribute_names(&resource), vec!["purgeable", "locked", "0x80"]);
    }
}
