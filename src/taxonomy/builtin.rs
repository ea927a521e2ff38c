//! Built-in base-ingredient vocabulary for Korean recipe data.
//!
//! Entries are listed in priority order. Several keywords deliberately appear
//! under more than one base (`갈비`, `안심`, `등심`, `쪽파`); the earlier base
//! claims those ingredients.

/// `(name, category, keywords)` rows in priority order.
pub(super) const BUILTIN_BASES: &[(&str, &str, &[&str])] = &[
    // 육류
    (
        "소고기",
        "육류",
        &[
            "소고기", "쇠고기", "한우", "육우", "불고기", "등심", "안심", "양지", "차돌", "사태", "갈비", "우둔", "설도", "채끝",
            "립아이",
        ],
    ),
    (
        "돼지고기",
        "육류",
        &[
            "돼지", "삼겹", "목살", "앞다리", "뒷다리", "갈비", "등갈비", "안심", "등심", "항정살", "가브리살", "돈까스",
        ],
    ),
    ("닭고기", "육류", &["닭", "치킨", "닭가슴", "닭다리", "닭날개", "닭안심", "닭볶음탕"]),
    ("오리고기", "육류", &["오리", "훈제오리"]),
    ("양고기", "육류", &["양고기", "램", "양갈비"]),
    // 해물류
    ("미역", "해물류", &["미역", "건미역", "자른미역", "돌미역", "기장미역"]),
    ("김", "해물류", &["김", "김밥김", "조미김", "구운김", "파래김"]),
    ("새우", "해물류", &["새우", "대하", "중하", "칵테일새우", "젓새우", "건새우"]),
    ("오징어", "해물류", &["오징어", "마른오징어", "건오징어", "물오징어"]),
    ("조개", "해물류", &["조개", "바지락", "모시조개", "가리비", "홍합", "굴"]),
    ("멸치", "해물류", &["멸치", "국물멸치", "볶음멸치", "잔멸치", "중멸치"]),
    ("참치", "해물류", &["참치", "참치캔", "참치살"]),
    ("고등어", "해물류", &["고등어", "자반고등어"]),
    ("연어", "해물류", &["연어", "훈제연어", "연어살"]),
    ("게", "해물류", &["게", "꽃게", "대게", "킹크랩", "게살", "게맛살"]),
    // 채소류
    ("양파", "채소류", &["양파", "자색양파", "적양파"]),
    ("대파", "채소류", &["대파", "파", "쪽파", "실파"]),
    ("마늘", "채소류", &["마늘", "다진마늘", "편마늘", "통마늘", "마늘종"]),
    ("생강", "채소류", &["생강", "다진생강", "생강가루"]),
    ("감자", "채소류", &["감자", "알감자", "햇감자", "수미감자"]),
    ("고구마", "채소류", &["고구마", "호박고구마", "밤고구마"]),
    ("당근", "채소류", &["당근", "미니당근"]),
    ("무", "채소류", &["무", "총각무", "알타리무", "열무"]),
    ("배추", "채소류", &["배추", "알배추", "얼갈이배추", "봄배추"]),
    ("시금치", "채소류", &["시금치", "냉동시금치"]),
    ("버섯", "채소류", &["버섯", "표고", "새송이", "팽이", "느타리", "양송이", "목이버섯", "송이버섯"]),
    ("고추", "채소류", &["고추", "청양고추", "홍고추", "풋고추", "오이고추", "꽈리고추", "피망", "파프리카"]),
    ("호박", "채소류", &["호박", "애호박", "늙은호박", "단호박", "주키니"]),
    ("오이", "채소류", &["오이", "백오이", "취청오이"]),
    ("콩나물", "채소류", &["콩나물", "숙주", "숙주나물"]),
    ("양배추", "채소류", &["양배추", "적양배추"]),
    ("브로콜리", "채소류", &["브로콜리", "냉동브로콜리"]),
    ("부추", "채소류", &["부추", "쪽파"]),
    ("미나리", "채소류", &["미나리"]),
    ("깻잎", "채소류", &["깻잎", "깻순"]),
    ("상추", "채소류", &["상추", "양상추", "로메인", "청상추", "적상추"]),
    // 콩/견과류
    ("두부", "콩/견과류", &["두부", "순두부", "연두부", "부침두부", "찌개두부"]),
    ("콩", "콩/견과류", &["콩", "검은콩", "서리태", "강낭콩", "완두콩", "병아리콩"]),
    // 달걀/유제품
    ("계란", "달걀/유제품", &["계란", "달걀", "메추리알"]),
    ("우유", "달걀/유제품", &["우유", "저지방우유", "무지방우유"]),
    ("치즈", "달걀/유제품", &["치즈", "모짜렐라", "체다", "슬라이스치즈", "크림치즈", "파마산"]),
    ("버터", "달걀/유제품", &["버터", "무염버터", "가염버터"]),
    ("생크림", "달걀/유제품", &["생크림", "휘핑크림", "크림"]),
    // 곡류
    ("쌀", "곡류", &["쌀", "현미", "찹쌀", "흑미", "오곡"]),
    ("밀가루", "곡류", &["밀가루", "박력분", "중력분", "강력분"]),
    ("면", "곡류", &["면", "국수", "소면", "우동면", "스파게티", "파스타", "라면", "당면", "쌀국수"]),
    ("떡", "곡류", &["떡", "떡국떡", "가래떡", "떡볶이떡", "인절미", "송편"]),
    ("빵", "곡류", &["빵", "식빵", "바게트", "모닝빵"]),
    // 김치류
    ("김치", "김치류", &["김치", "배추김치", "묵은지", "신김치", "겉절이", "백김치"]),
    ("깍두기", "김치류", &["깍두기", "깍뚜기"]),
    // 양념류
    ("간장", "양념류", &["간장", "진간장", "국간장", "양조간장", "조림간장"]),
    ("된장", "양념류", &["된장", "재래된장", "청국장"]),
    ("고추장", "양념류", &["고추장", "태양초고추장"]),
    ("고춧가루", "양념류", &["고춧가루", "고추가루", "김치용고춧가루"]),
    ("참기름", "양념류", &["참기름", "들기름", "참깨"]),
    ("설탕", "양념류", &["설탕", "흑설탕", "황설탕", "백설탕"]),
    ("소금", "양념류", &["소금", "천일염", "꽃소금", "구운소금"]),
    ("식초", "양념류", &["식초", "현미식초", "사과식초", "발사믹"]),
    ("올리브오일", "양념류", &["올리브오일", "올리브유", "엑스트라버진"]),
    ("굴소스", "양념류", &["굴소스"]),
    ("맛술", "양념류", &["맛술", "미림", "미린", "청주", "요리술"]),
    ("액젓", "양념류", &["액젓", "까나리액젓", "멸치액젓", "참치액", "젓갈"]),
];
