//! Temperature-driven clothing recommendations.
//!
//! The real line is split into eight tiers by descending lower bounds
//! (28, 23, 20, 17, 12, 9, 5, and everything below). A temperature belongs to
//! the first tier whose bound it meets, so each bound is inclusive upward.

use crate::images::ImageCatalog;
use crate::models::{AdvancedConditions, ClothingRecommendation, RiskLevel};
use std::sync::Arc;

pub struct Tier {
    /// Inclusive lower bound; `None` for the open-ended coldest tier.
    pub min_temp: Option<f64>,
    pub slug: &'static str,
    pub category: &'static str,
    pub items: &'static [&'static str],
    pub advice: &'static str,
}

pub static TIERS: [Tier; 8] = [
    Tier {
        min_temp: Some(28.0),
        slug: "very-hot",
        category: "매우 더움",
        items: &["민소매", "반팔", "반바지", "원피스", "샌들"],
        advice: "가볍고 시원한 옷을 착용하세요. 자외선 차단에 신경쓰세요.",
    },
    Tier {
        min_temp: Some(23.0),
        slug: "hot",
        category: "더움",
        items: &["반팔", "얇은 셔츠", "반바지", "면바지", "운동화"],
        advice: "통풍이 잘 되는 옷을 선택하세요.",
    },
    Tier {
        min_temp: Some(20.0),
        slug: "warm",
        category: "약간 더움",
        items: &["얇은 가디건", "긴팔", "면바지", "청바지"],
        advice: "일교차에 대비해 얇은 겉옷을 챙기세요.",
    },
    Tier {
        min_temp: Some(17.0),
        slug: "mild",
        category: "선선함",
        items: &["가디건", "니트", "맨투맨", "청바지", "면바지"],
        advice: "가볍게 걸칠 수 있는 옷을 준비하세요.",
    },
    Tier {
        min_temp: Some(12.0),
        slug: "chilly",
        category: "쌀쌀함",
        items: &["자켓", "가디건", "청바지", "면바지", "스니커즈"],
        advice: "가을 느낌의 따뜻한 옷차림이 좋습니다.",
    },
    Tier {
        min_temp: Some(9.0),
        slug: "cold",
        category: "추움",
        items: &["트렌치 코트", "야상", "니트", "청바지", "스니커즈"],
        advice: "아우터를 꼭 챙기세요.",
    },
    Tier {
        min_temp: Some(5.0),
        slug: "very-cold",
        category: "매우 추움",
        items: &["코트", "가죽 자켓", "히트텍", "니트", "목도리"],
        advice: "따뜻한 겨울 옷을 착용하세요.",
    },
    Tier {
        min_temp: None,
        slug: "freezing",
        category: "한파",
        items: &["패딩", "두꺼운 코트", "목도리", "장갑", "방한화"],
        advice: "최대한 두껍게 입고 외출을 자제하세요.",
    },
];

const WIND_THRESHOLD_MS: f64 = 8.0;
const HUMID_THRESHOLD_PCT: f64 = 80.0;
const HUMID_MIN_TEMP_C: f64 = 24.0;

pub fn tier_for(temp_c: f64) -> &'static Tier {
    TIERS
        .iter()
        .find(|tier| tier.min_temp.map_or(true, |min| temp_c >= min))
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

/// Wind-chill heuristic: `temp - wind * 0.7`, then HIGH at or below 0°C and
/// MEDIUM at or below 10°C. Not a meteorological standard.
pub fn cold_risk(temp_c: f64, wind_speed_ms: f64) -> RiskLevel {
    let feels_like = temp_c - wind_speed_ms * 0.7;
    if feels_like <= 0.0 {
        RiskLevel::High
    } else if feels_like <= 10.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[derive(Clone, Default)]
pub struct ClothingRecommender {
    images: Arc<ImageCatalog>,
}

impl ClothingRecommender {
    pub fn new(images: Arc<ImageCatalog>) -> Self {
        Self { images }
    }

    pub fn recommend(&self, temp_c: f64) -> ClothingRecommendation {
        let tier = tier_for(temp_c);
        ClothingRecommendation {
            category: tier.category.to_string(),
            items: tier.items.iter().map(|s| s.to_string()).collect(),
            advice: tier.advice.to_string(),
            images: self.images.images_for_temp(temp_c),
            risk_level: None,
            accessories: None,
            extra_tips: None,
        }
    }

    /// `recommend` plus accessories and tips from the weather context, and a cold risk.
    pub fn recommend_advanced(&self, input: &AdvancedConditions) -> ClothingRecommendation {
        let temp_c = input.temperature;
        let mut accessories: Vec<String> = Vec::new();
        let mut tips: Vec<String> = Vec::new();

        match input.condition.as_deref() {
            Some("Rain") | Some("Drizzle") => {
                accessories.extend(["우산".to_string(), "방수 자켓".to_string()]);
                tips.push("비 소식이 있어요. 우산과 방수 겉옷을 챙기세요.".to_string());
            }
            Some("Snow") => {
                accessories.extend(["방수 부츠".to_string(), "두꺼운 양말".to_string()]);
                tips.push("눈길이 미끄러울 수 있어요. 미끄럼 방지 신발을 신으세요.".to_string());
            }
            _ => {}
        }

        if input.wind_speed >= WIND_THRESHOLD_MS {
            accessories.extend(["모자".to_string(), "귀마개".to_string()]);
            tips.push("바람이 강해 체감온도가 더 낮아요. 바람막이를 챙기세요.".to_string());
        }

        if input.humidity >= HUMID_THRESHOLD_PCT && temp_c >= HUMID_MIN_TEMP_C {
            tips.push("습도가 높아 불쾌지수가 높아요. 통기성 좋은 소재를 고르세요.".to_string());
        }

        if input.is_night {
            tips.push("밤에는 기온이 떨어지니 얇은 겉옷을 하나 더 챙기세요.".to_string());
        }

        ClothingRecommendation {
            risk_level: Some(cold_risk(temp_c, input.wind_speed)),
            accessories: Some(accessories),
            extra_tips: Some(tips),
            ..self.recommend(temp_c)
        }
    }
}
