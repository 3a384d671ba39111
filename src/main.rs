use netload::entry;
use netload::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
