use kairos_rfc::ical::{ICalTime, RecurrenceSet, parse_rrule};

pub struct RRuleCase {
    pub name: &'static str,
    pub dtstart: &'static str,
    pub rrule: &'static str,
    pub expected: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
    pub limit: usize,
    pub after: Option<&'static str>,
    pub before: Option<&'static str>,
}

const NY: &str = "TZID=America/New_York:";

fn case(
    name: &'static str,
    dtstart: &'static str,
    rrule: &'static str,
    expected: &'static [&'static str],
    limit: usize,
) -> RRuleCase {
    RRuleCase {
        name,
        dtstart,
        rrule,
        expected: Some(expected),
        expected_len: None,
        limit,
        after: None,
        before: None,
    }
}

fn counted(
    name: &'static str,
    dtstart: &'static str,
    rrule: &'static str,
    expected_len: usize,
    limit: usize,
) -> RRuleCase {
    RRuleCase {
        name,
        dtstart,
        rrule,
        expected: None,
        expected_len: Some(expected_len),
        limit,
        after: None,
        before: None,
    }
}

/// RFC 5545 §3.8.5.3 examples. DTSTART values are written without the
/// `TZID=America/New_York:` prefix; it is added by [`rrule_cases`].
#[expect(clippy::too_many_lines)]
pub fn rrule_cases() -> Vec<RRuleCase> {
    vec![
        case(
            "daily_for_10",
            "19970902T090000",
            "FREQ=DAILY;COUNT=10",
            &[
                "19970902T090000",
                "19970903T090000",
                "19970904T090000",
                "19970905T090000",
                "19970906T090000",
                "19970907T090000",
                "19970908T090000",
                "19970909T090000",
                "19970910T090000",
                "19970911T090000",
            ],
            100,
        ),
        counted(
            "daily_until_dec_24",
            "19970902T090000",
            "FREQ=DAILY;UNTIL=19971224T000000Z",
            113,
            200,
        ),
        case(
            "every_other_day",
            "19970902T090000",
            "FREQ=DAILY;INTERVAL=2",
            &[
                "19970902T090000",
                "19970904T090000",
                "19970906T090000",
                "19970908T090000",
                "19970910T090000",
            ],
            5,
        ),
        case(
            "every_10_days_5_times",
            "19970902T090000",
            "FREQ=DAILY;INTERVAL=10;COUNT=5",
            &[
                "19970902T090000",
                "19970912T090000",
                "19970922T090000",
                "19971002T090000",
                "19971012T090000",
            ],
            100,
        ),
        counted(
            "every_day_in_january_yearly",
            "19980101T090000",
            "FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=SU,MO,TU,WE,TH,FR,SA",
            93,
            200,
        ),
        counted(
            "every_day_in_january_daily",
            "19980101T090000",
            "FREQ=DAILY;UNTIL=20000131T140000Z;BYMONTH=1",
            93,
            200,
        ),
        counted("weekly_for_10", "19970902T090000", "FREQ=WEEKLY;COUNT=10", 10, 100),
        counted(
            "weekly_until_dec_24",
            "19970902T090000",
            "FREQ=WEEKLY;UNTIL=19971224T000000Z",
            17,
            100,
        ),
        case(
            "weekly_tue_thu_five_weeks",
            "19970902T090000",
            "FREQ=WEEKLY;UNTIL=19971007T000000Z;WKST=SU;BYDAY=TU,TH",
            &[
                "19970902T090000",
                "19970904T090000",
                "19970909T090000",
                "19970911T090000",
                "19970916T090000",
                "19970918T090000",
                "19970923T090000",
                "19970925T090000",
                "19970930T090000",
                "19971002T090000",
            ],
            100,
        ),
        case(
            "every_other_week_mon_wed_fri",
            "19970901T090000",
            "FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;WKST=SU;BYDAY=MO,WE,FR",
            &[
                "19970901T090000",
                "19970903T090000",
                "19970905T090000",
                "19970915T090000",
                "19970917T090000",
                "19970919T090000",
                "19970929T090000",
                "19971001T090000",
                "19971003T090000",
                "19971013T090000",
                "19971015T090000",
                "19971017T090000",
                "19971027T090000",
                "19971029T090000",
                "19971031T090000",
                "19971110T090000",
                "19971112T090000",
                "19971114T090000",
                "19971124T090000",
                "19971126T090000",
                "19971128T090000",
                "19971208T090000",
                "19971210T090000",
                "19971212T090000",
                "19971222T090000",
            ],
            100,
        ),
        case(
            "every_other_week_tue_thu_8_times",
            "19970902T090000",
            "FREQ=WEEKLY;INTERVAL=2;COUNT=8;WKST=SU;BYDAY=TU,TH",
            &[
                "19970902T090000",
                "19970904T090000",
                "19970916T090000",
                "19970918T090000",
                "19970930T090000",
                "19971002T090000",
                "19971014T090000",
                "19971016T090000",
            ],
            100,
        ),
        case(
            "monthly_first_friday",
            "19970905T090000",
            "FREQ=MONTHLY;COUNT=10;BYDAY=1FR",
            &[
                "19970905T090000",
                "19971003T090000",
                "19971107T090000",
                "19971205T090000",
                "19980102T090000",
                "19980206T090000",
                "19980306T090000",
                "19980403T090000",
                "19980501T090000",
                "19980605T090000",
            ],
            100,
        ),
        case(
            "every_other_month_first_and_last_sunday",
            "19970907T090000",
            "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=1SU,-1SU",
            &[
                "19970907T090000",
                "19970928T090000",
                "19971102T090000",
                "19971130T090000",
                "19980104T090000",
                "19980125T090000",
                "19980301T090000",
                "19980329T090000",
                "19980503T090000",
                "19980531T090000",
            ],
            100,
        ),
        case(
            "monthly_second_to_last_monday",
            "19970922T090000",
            "FREQ=MONTHLY;COUNT=6;BYDAY=-2MO",
            &[
                "19970922T090000",
                "19971020T090000",
                "19971117T090000",
                "19971222T090000",
                "19980119T090000",
                "19980216T090000",
            ],
            100,
        ),
        case(
            "monthly_third_to_last_day",
            "19970928T090000",
            "FREQ=MONTHLY;BYMONTHDAY=-3",
            &[
                "19970928T090000",
                "19971029T090000",
                "19971128T090000",
                "19971229T090000",
                "19980129T090000",
                "19980226T090000",
            ],
            6,
        ),
        case(
            "monthly_2nd_and_15th",
            "19970902T090000",
            "FREQ=MONTHLY;COUNT=10;BYMONTHDAY=2,15",
            &[
                "19970902T090000",
                "19970915T090000",
                "19971002T090000",
                "19971015T090000",
                "19971102T090000",
                "19971115T090000",
                "19971202T090000",
                "19971215T090000",
                "19980102T090000",
                "19980115T090000",
            ],
            100,
        ),
        case(
            "monthly_first_and_last_day",
            "19970930T090000",
            "FREQ=MONTHLY;COUNT=10;BYMONTHDAY=1,-1",
            &[
                "19970930T090000",
                "19971001T090000",
                "19971031T090000",
                "19971101T090000",
                "19971130T090000",
                "19971201T090000",
                "19971231T090000",
                "19980101T090000",
                "19980131T090000",
                "19980201T090000",
            ],
            100,
        ),
        case(
            "every_18_months_10th_to_15th",
            "19970910T090000",
            "FREQ=MONTHLY;INTERVAL=18;COUNT=10;BYMONTHDAY=10,11,12,13,14,15",
            &[
                "19970910T090000",
                "19970911T090000",
                "19970912T090000",
                "19970913T090000",
                "19970914T090000",
                "19970915T090000",
                "19990310T090000",
                "19990311T090000",
                "19990312T090000",
                "19990313T090000",
            ],
            100,
        ),
        case(
            "every_tuesday_every_other_month",
            "19970902T090000",
            "FREQ=MONTHLY;INTERVAL=2;BYDAY=TU",
            &[
                "19970902T090000",
                "19970909T090000",
                "19970916T090000",
                "19970923T090000",
                "19970930T090000",
                "19971104T090000",
                "19971111T090000",
                "19971118T090000",
                "19971125T090000",
                "19980106T090000",
                "19980113T090000",
                "19980120T090000",
                "19980127T090000",
                "19980303T090000",
                "19980310T090000",
                "19980317T090000",
                "19980324T090000",
                "19980331T090000",
            ],
            18,
        ),
        case(
            "yearly_june_and_july",
            "19970610T090000",
            "FREQ=YEARLY;COUNT=10;BYMONTH=6,7",
            &[
                "19970610T090000",
                "19970710T090000",
                "19980610T090000",
                "19980710T090000",
                "19990610T090000",
                "19990710T090000",
                "20000610T090000",
                "20000710T090000",
                "20010610T090000",
                "20010710T090000",
            ],
            100,
        ),
        case(
            "every_other_year_january_to_march",
            "19970310T090000",
            "FREQ=YEARLY;INTERVAL=2;COUNT=10;BYMONTH=1,2,3",
            &[
                "19970310T090000",
                "19990110T090000",
                "19990210T090000",
                "19990310T090000",
                "20010110T090000",
                "20010210T090000",
                "20010310T090000",
                "20030110T090000",
                "20030210T090000",
                "20030310T090000",
            ],
            100,
        ),
        case(
            "every_third_year_by_yearday",
            "19970101T090000",
            "FREQ=YEARLY;INTERVAL=3;COUNT=10;BYYEARDAY=1,100,200",
            &[
                "19970101T090000",
                "19970410T090000",
                "19970719T090000",
                "20000101T090000",
                "20000409T090000",
                "20000718T090000",
                "20030101T090000",
                "20030410T090000",
                "20030719T090000",
                "20060101T090000",
            ],
            100,
        ),
        case(
            "every_20th_monday",
            "19970519T090000",
            "FREQ=YEARLY;BYDAY=20MO",
            &["19970519T090000", "19980518T090000", "19990517T090000"],
            3,
        ),
        case(
            "monday_of_week_20",
            "19970512T090000",
            "FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO",
            &["19970512T090000", "19980511T090000", "19990517T090000"],
            3,
        ),
        case(
            "every_thursday_in_march",
            "19970313T090000",
            "FREQ=YEARLY;BYMONTH=3;BYDAY=TH",
            &[
                "19970313T090000",
                "19970320T090000",
                "19970327T090000",
                "19980305T090000",
                "19980312T090000",
                "19980319T090000",
                "19980326T090000",
                "19990304T090000",
                "19990311T090000",
                "19990318T090000",
                "19990325T090000",
            ],
            11,
        ),
        case(
            "friday_the_13th",
            "19970902T090000",
            "FREQ=MONTHLY;BYDAY=FR;BYMONTHDAY=13",
            &[
                "19980213T090000",
                "19980313T090000",
                "19981113T090000",
                "19990813T090000",
                "20001013T090000",
            ],
            5,
        ),
        case(
            "first_saturday_after_first_sunday",
            "19970913T090000",
            "FREQ=MONTHLY;BYDAY=SA;BYMONTHDAY=7,8,9,10,11,12,13",
            &[
                "19970913T090000",
                "19971011T090000",
                "19971108T090000",
                "19971213T090000",
                "19980110T090000",
                "19980207T090000",
                "19980307T090000",
                "19980411T090000",
                "19980509T090000",
                "19980613T090000",
            ],
            10,
        ),
        case(
            "us_presidential_election_day",
            "19961105T090000",
            "FREQ=YEARLY;INTERVAL=4;BYMONTH=11;BYDAY=TU;BYMONTHDAY=2,3,4,5,6,7,8",
            &["19961105T090000", "20001107T090000", "20041102T090000"],
            3,
        ),
        case(
            "third_tue_wed_or_thu",
            "19970904T090000",
            "FREQ=MONTHLY;COUNT=3;BYDAY=TU,WE,TH;BYSETPOS=3",
            &["19970904T090000", "19971007T090000", "19971106T090000"],
            100,
        ),
        case(
            "second_to_last_weekday",
            "19970929T090000",
            "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2",
            &[
                "19970929T090000",
                "19971030T090000",
                "19971127T090000",
                "19971230T090000",
                "19980129T090000",
                "19980226T090000",
                "19980330T090000",
            ],
            7,
        ),
        case(
            "every_3_hours",
            "19970902T090000",
            "FREQ=HOURLY;INTERVAL=3;UNTIL=19970902T210000Z",
            &["19970902T090000", "19970902T120000", "19970902T150000"],
            100,
        ),
        case(
            "every_15_minutes",
            "19970902T090000",
            "FREQ=MINUTELY;INTERVAL=15;COUNT=6",
            &[
                "19970902T090000",
                "19970902T091500",
                "19970902T093000",
                "19970902T094500",
                "19970902T100000",
                "19970902T101500",
            ],
            100,
        ),
        case(
            "every_90_minutes",
            "19970902T090000",
            "FREQ=MINUTELY;INTERVAL=90;COUNT=4",
            &[
                "19970902T090000",
                "19970902T103000",
                "19970902T120000",
                "19970902T133000",
            ],
            100,
        ),
        counted(
            "every_20_minutes_daily_form",
            "19970902T090000",
            "FREQ=DAILY;BYHOUR=9,10,11,12,13,14,15,16;BYMINUTE=0,20,40",
            48,
            48,
        ),
        RRuleCase {
            name: "every_20_minutes_minutely_form",
            dtstart: "19970902T090000",
            rrule: "FREQ=MINUTELY;INTERVAL=20;BYHOUR=9,10,11,12,13,14,15,16",
            expected: Some(&["19970903T090000", "19970903T092000"]),
            expected_len: None,
            limit: 2,
            after: Some("19970902T164000"),
            before: None,
        },
        case(
            "week_start_monday",
            "19970805T090000",
            "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=MO",
            &[
                "19970805T090000",
                "19970810T090000",
                "19970819T090000",
                "19970824T090000",
            ],
            100,
        ),
        case(
            "week_start_sunday",
            "19970805T090000",
            "FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=SU",
            &[
                "19970805T090000",
                "19970817T090000",
                "19970819T090000",
                "19970831T090000",
            ],
            100,
        ),
        case(
            "invalid_dates_are_skipped",
            "20070115T090000",
            "FREQ=MONTHLY;BYMONTHDAY=15,30;COUNT=5",
            &[
                "20070115T090000",
                "20070130T090000",
                "20070215T090000",
                "20070315T090000",
                "20070330T090000",
            ],
            100,
        ),
        RRuleCase {
            name: "window_before",
            dtstart: "19970902T090000",
            rrule: "FREQ=DAILY",
            expected: Some(&["19970904T090000", "19970905T090000"]),
            expected_len: None,
            limit: 100,
            after: Some("19970903T090000"),
            before: Some("19970906T090000"),
        },
    ]
}

pub fn assert_case(case: &RRuleCase) {
    let dtstart = ICalTime::parse(&format!("{NY}{}", case.dtstart))
        .unwrap_or_else(|err| panic!("Failed to parse DTSTART of {}: {err}", case.name));
    let rule = parse_rrule(case.rrule, 1, 1)
        .unwrap_or_else(|err| panic!("Failed to parse {}: {err}", case.name));
    let set = RecurrenceSet::new(dtstart.clone())
        .with_rrule(rule)
        .include_dtstart(false);

    let bound = |value: Option<&str>| {
        value.map(|value| {
            ICalTime::parse_with_tzid(value, dtstart.tzid())
                .unwrap_or_else(|err| panic!("Failed to parse window of {}: {err}", case.name))
                .naive()
        })
    };
    let after = bound(case.after);
    let before = bound(case.before);

    let actual: Vec<String> = set
        .iter()
        .unwrap_or_else(|err| panic!("Failed to expand {}: {err}", case.name))
        .skip_while(|o| after.is_some_and(|after| o.naive() <= after))
        .take_while(|o| before.is_none_or(|before| o.naive() < before))
        .take(case.limit)
        .map(|o| o.to_ical_string())
        .collect();

    if let Some(expected) = case.expected {
        assert_eq!(actual, expected, "Case {} did not match", case.name);
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            actual.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}
