//! Shared test data: a small pandas-style export of the reshaped dataset.

use std::io::Write;
use tempfile::NamedTempFile;

pub const SAMPLE_ROWS: usize = 15;

/// Five states over three years, with the leading unnamed index column a
/// pandas `to_csv()` leaves behind.
pub const SAMPLE_CSV: &str = "\
,states,states_code,id,year,population
0,Alabama,AL,1,2010,4785437
1,California,CA,6,2010,37319502
2,New York,NY,36,2010,19399878
3,Texas,TX,48,2010,25241971
4,Wyoming,WY,56,2010,564487
5,Alabama,AL,1,2015,4852347
6,California,CA,6,2015,38918045
7,New York,NY,36,2015,19819347
8,Texas,TX,48,2015,27429639
9,Wyoming,WY,56,2015,585668
10,Alabama,AL,1,2019,4903185
11,California,CA,6,2019,39512223
12,New York,NY,36,2019,19453561
13,Texas,TX,48,2019,28995881
14,Wyoming,WY,56,2019,578759
";

pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_sample_csv() -> NamedTempFile {
    write_csv(SAMPLE_CSV)
}
