use crate::models::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Canonical English name, as accepted by the provider.
    pub name: &'static str,
    pub display_name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

const fn city(name: &'static str, display_name: &'static str, lat: f64, lon: f64) -> City {
    City {
        name,
        display_name,
        lat,
        lon,
    }
}

pub static KOREAN_CITIES: [City; 18] = [
    city("Seoul", "서울", 37.5665, 126.9780),
    city("Incheon", "인천", 37.4563, 126.7052),
    city("Suwon", "수원", 37.2636, 127.0286),
    city("Daejeon", "대전", 36.3504, 127.3845),
    city("Daegu", "대구", 35.8714, 128.6014),
    city("Gwangju", "광주", 35.1595, 126.8526),
    city("Ulsan", "울산", 35.5384, 129.3114),
    city("Busan", "부산", 35.1796, 129.0756),
    city("Jeju", "제주", 33.4996, 126.5312),
    city("Chuncheon", "춘천", 37.8813, 127.7298),
    city("Gangneung", "강릉", 37.7519, 128.8761),
    city("Sokcho", "속초", 38.2070, 128.5910),
    city("Gyeongju", "경주", 35.8562, 129.2247),
    city("Jeonju", "전주", 35.8242, 127.1480),
    city("Yeosu", "여수", 34.7604, 127.6622),
    city("Cheongju", "청주", 36.6424, 127.4890),
    city("Pohang", "포항", 36.0190, 129.3435),
    city("Andong", "안동", 36.5684, 128.7294),
];

/// Case-insensitive exact match on the English name.
pub fn find_city(query: &str) -> Option<&'static City> {
    let query = query.trim();
    KOREAN_CITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(query))
}
