mod loader;
mod record;

pub use self::loader::Loader;
pub use self::record::Record;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('/', "").replace('-', "").replace('_', "").replace(' ', "")
}
