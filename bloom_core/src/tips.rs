//! Weekly pregnancy tips library.

/// Returned for weeks outside 1–40
pub const FALLBACK_TIP: &str = "Enjoy this special time in your pregnancy journey";

const WEEKLY_TIPS: [[&str; 3]; 40] = [
    // Week 1
    [
        "Start taking folic acid (400mcg daily) if you haven't already",
        "Maintain a healthy diet with plenty of fruits and vegetables",
        "Avoid alcohol, smoking, and recreational drugs",
    ],
    // Week 2
    [
        "Continue prenatal vitamins with folic acid",
        "Stay hydrated with 8-10 glasses of water daily",
        "Begin tracking your symptoms and changes",
    ],
    // Week 3
    [
        "Implantation may occur this week - light spotting is normal",
        "Reduce caffeine intake to less than 200mg per day",
        "Get plenty of rest and manage stress levels",
    ],
    // Week 4
    [
        "You might notice your first pregnancy symptoms",
        "Schedule your first prenatal appointment",
        "Continue healthy eating habits with plenty of protein",
    ],
    // Week 5
    [
        "Morning sickness may begin - try eating small, frequent meals",
        "Keep crackers by your bedside for morning nausea",
        "Stay active with gentle exercise like walking",
    ],
    // Week 6
    [
        "Fatigue is common - listen to your body and rest when needed",
        "Consider ginger tea or supplements for nausea relief",
        "Wear a supportive bra as your breasts may become tender",
    ],
    // Week 7
    [
        "Food aversions and cravings may develop",
        "Keep healthy snacks readily available",
        "Stay consistent with prenatal vitamin routine",
    ],
    // Week 8
    [
        "Your first prenatal visit should happen around this time",
        "Discuss any concerns or symptoms with your healthcare provider",
        "Begin documenting your pregnancy journey",
    ],
    // Week 9
    [
        "Morning sickness may peak around this time",
        "Try eating bland foods like toast or rice",
        "Stay hydrated even if you're feeling nauseous",
    ],
    // Week 10
    [
        "Your uterus is now the size of a grapefruit",
        "You may notice your pants getting tighter",
        "Consider maternity clothes shopping soon",
    ],
    // Week 11
    [
        "Energy levels may start to improve",
        "Continue gentle exercise and stretching",
        "Start thinking about pregnancy announcements",
    ],
    // Week 12
    [
        "End of first trimester - miscarriage risk decreases significantly",
        "Many people choose to announce pregnancy now",
        "Morning sickness may begin to subside",
    ],
    // Week 13
    [
        "Welcome to the second trimester!",
        "Energy levels typically improve during this phase",
        "Start planning your maternity wardrobe",
    ],
    // Week 14
    [
        "Your appetite may return with reduced nausea",
        "Focus on calcium-rich foods for bone development",
        "Consider prenatal classes for later in pregnancy",
    ],
    // Week 15
    [
        "You may start to show a small bump",
        "Increase protein intake to support rapid growth",
        "Stay active with swimming or prenatal yoga",
    ],
    // Week 16
    [
        "You might feel first movements (quickening) soon",
        "Schedule your anatomy scan for weeks 18-22",
        "Consider maternity photography planning",
    ],
    // Week 17
    [
        "Baby's hearing is developing - talk and sing to your bump",
        "Continue eating iron-rich foods to prevent anemia",
        "Practice good posture as your center of gravity shifts",
    ],
    // Week 18
    [
        "Anatomy scan week! You may learn baby's sex",
        "First movements may be felt as flutters",
        "Consider starting a pregnancy journal",
    ],
    // Week 19
    [
        "Baby can hear sounds from outside the womb",
        "Continue moderate exercise and stretching",
        "Stay mindful of your changing balance",
    ],
    // Week 20
    [
        "Halfway point - congratulations!",
        "Movements should be more noticeable now",
        "Schedule maternity photos for weeks 28-32",
    ],
    // Week 21
    [
        "Baby's movements are becoming stronger",
        "Focus on healthy weight gain (1-2 lbs per week)",
        "Consider childbirth education classes",
    ],
    // Week 22
    [
        "Baby's senses are rapidly developing",
        "You may experience Braxton Hicks contractions",
        "Practice relaxation and breathing techniques",
    ],
    // Week 23
    [
        "Baby is considered viable outside the womb",
        "Continue monitoring movements daily",
        "Stay hydrated to prevent false labor contractions",
    ],
    // Week 24
    [
        "Glucose screening test may be scheduled",
        "Baby's hearing is more developed - play music",
        "Consider starting childbirth classes",
    ],
    // Week 25
    [
        "You may experience more vivid dreams",
        "Practice prenatal yoga for flexibility and relaxation",
        "Begin researching pediatricians",
    ],
    // Week 26
    [
        "Baby's eyes can open and close",
        "You may notice increased appetite",
        "Start planning your maternity leave",
    ],
    // Week 27
    [
        "End of second trimester approaching",
        "Baby's brain tissue is developing rapidly",
        "Consider touring your birth facility",
    ],
    // Week 28
    [
        "Welcome to the third trimester!",
        "Appointments will become more frequent",
        "Start thinking about birth plan preferences",
    ],
    // Week 29
    [
        "Baby's movements may feel more intense",
        "Practice kick counts - 10 movements in 2 hours",
        "Consider breastfeeding classes",
    ],
    // Week 30
    [
        "Baby's brain is growing rapidly",
        "You may experience more back discomfort",
        "Start preparing the nursery",
    ],
    // Week 31
    [
        "Baby is gaining weight quickly",
        "Practice good sleep positioning (left side)",
        "Begin hospital bag packing checklist",
    ],
    // Week 32
    [
        "Baby's bones are hardening except skull",
        "Maternity photo session time!",
        "Discuss birth plan with your healthcare provider",
    ],
    // Week 33
    [
        "Baby's immune system is developing",
        "You may feel more shortness of breath",
        "Practice relaxation techniques for labor",
    ],
    // Week 34
    [
        "Baby's central nervous system is maturing",
        "Consider infant CPR classes",
        "Finalize childcare arrangements",
    ],
    // Week 35
    [
        "Baby's kidneys are fully developed",
        "Pack your hospital bag",
        "Install car seat and have it inspected",
    ],
    // Week 36
    [
        "Baby is considered full-term soon",
        "Weekly appointments begin",
        "Prepare for potential early labor signs",
    ],
    // Week 37
    [
        "Baby is now considered full-term!",
        "Discuss labor signs with your provider",
        "Ensure support system is ready",
    ],
    // Week 38
    [
        "Baby could arrive any day now",
        "Stay close to home and hospital",
        "Practice your breathing exercises",
    ],
    // Week 39
    [
        "Final preparations for baby's arrival",
        "Rest when possible and stay hydrated",
        "Trust your body and your birthing team",
    ],
    // Week 40
    [
        "Due date week - congratulations on making it this far!",
        "Stay patient - babies come when they're ready",
        "You're about to meet your little one!",
    ],
];

const GENERAL_TIPS: [&str; 7] = [
    "Track your menstrual cycle to understand your body better",
    "Maintain a healthy diet rich in fruits and vegetables",
    "Stay active with regular exercise you enjoy",
    "Get adequate sleep (7-9 hours per night)",
    "Manage stress through relaxation techniques",
    "Stay hydrated with plenty of water",
    "Consider taking folic acid if planning to conceive",
];

/// Tips for pregnancy `week`, or a single encouragement outside 1–40
pub fn tips_for_week(week: u32) -> Vec<&'static str> {
    week.checked_sub(1)
        .and_then(|idx| WEEKLY_TIPS.get(idx as usize))
        .map(|tips| tips.to_vec())
        .unwrap_or_else(|| vec![FALLBACK_TIP])
}

/// Tips shown when the user is not pregnant
pub fn general_tips() -> &'static [&'static str] {
    &GENERAL_TIPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_week_has_three_tips() {
        for week in 1..=40 {
            let tips = tips_for_week(week);
            assert_eq!(tips.len(), 3, "week {}", week);
            assert!(tips.iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn test_known_weeks() {
        assert!(tips_for_week(1)[0].contains("folic acid"));
        assert!(tips_for_week(40)[2].contains("meet your little one"));
    }

    #[test]
    fn test_out_of_range_week_falls_back() {
        assert_eq!(tips_for_week(0), vec![FALLBACK_TIP]);
        assert_eq!(tips_for_week(41), vec![FALLBACK_TIP]);
    }

    #[test]
    fn test_general_tips() {
        assert_eq!(general_tips().len(), 7);
    }
}
