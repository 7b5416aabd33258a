//! Fixed-width entry names.

use indexmap::IndexMap;

use crate::error::EntryError;

/// Store `name` in a zero padded field of `N` bytes, keeping at most `max_len` bytes of text.
pub fn encode_name<const N: usize>(name: &str, max_len: usize) -> Result<[u8; N], EntryError> {
    let bytes = name.as_bytes();
    if bytes.len() > max_len.min(N) {
        return Err(EntryError::NameTooLong {
            name: name.to_owned(),
            max: max_len.min(N),
        });
    }

    let mut field = [0; N];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

/// The text of a name field: everything before the first zero byte.
pub fn decode_name(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// File name of the `copy`th picture named `name`, counting from 1.
pub fn export_file_name(name: &str, copy: usize) -> String {
    let name = sanitize(name);
    if copy == 1 {
        format!("{name}.bmp")
    } else {
        format!("{name}__{copy}.bmp")
    }
}

/// Replace the characters Windows refuses in file names, path separators included.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Numbers pictures sharing a name, in table order.
///
/// Names are compared over their whole field, bytes after the terminator included.
#[derive(Debug, Default)]
pub struct DuplicateCounter<const N: usize> {
    seen: IndexMap<[u8; N], usize>,
}

impl<const N: usize> DuplicateCounter<N> {
    pub fn new() -> Self {
        Self {
            seen: IndexMap::new(),
        }
    }

    /// Count one more entry named `field` and return its occurrence number.
    pub fn next_copy(&mut self, field: &[u8; N]) -> usize {
        let count = self.seen.entry(*field).or_insert(0);
        *count += 1;
        *count
    }

    /// Names seen more than once, in the order they first appeared. Empty names are left out.
    pub fn duplicates(&self) -> impl Iterator<Item = (String, usize)> + '_ {
        self.seen
            .iter()
            .filter(|(field, &count)| count > 1 && field.first() != Some(&0))
            .map(|(field, &count)| (decode_name(field), count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_get_numbered() -> Result<(), EntryError> {
        let mut counter = DuplicateCounter::<23>::new();

        let names: Vec<String> = ["FOO", "FOO", "BAR", "FOO"]
            .iter()
            .map(|name| -> Result<String, EntryError> {
                let field = encode_name::<23>(name, 22)?;
                Ok(export_file_name(name, counter.next_copy(&field)))
            })
            .collect::<Result<_, EntryError>>()?;

        assert_eq!(names, ["FOO.bmp", "FOO__2.bmp", "BAR.bmp", "FOO__3.bmp"]);
        assert_eq!(counter.duplicates().collect::<Vec<_>>(), [("FOO".to_string(), 3)]);
        Ok(())
    }

    #[test]
    fn bytes_after_terminator_count() {
        let mut counter = DuplicateCounter::<8>::new();
        let clean = *b"FOO\0\0\0\0\0";
        let dirty = *b"FOO\0\0\0X\0";

        assert_eq!(counter.next_copy(&clean), 1);
        assert_eq!(counter.next_copy(&dirty), 1);
        assert_eq!(decode_name(&dirty), "FOO");
    }

    #[test]
    fn file_names_stay_in_the_folder() {
        assert_eq!(export_file_name("../UP", 1), ".._UP.bmp");
        assert_eq!(export_file_name("A*B", 2), "A_B__2.bmp");
    }

    #[test]
    fn name_limits() {
        assert!(encode_name::<8>("WALDOMAP", 8).is_ok());
        assert!(encode_name::<8>("WALDOMAP1", 8).is_err());
        assert!(encode_name::<23>(&"X".repeat(23), 22).is_err());
        assert_eq!(decode_name(b"FULLNAME"), "FULLNAME");
    }
}
