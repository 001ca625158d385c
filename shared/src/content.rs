//! 静态页面内容
//!
//! 团队介绍、善款用途与募捐活动都是固定数据，由展示组件直接映射为标记。

use crate::Amount;
use crate::image::CampaignImage;
use std::borrow::Cow;

/// 通用卡片：`{ title, description, image }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCard {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub image: CampaignImage,
    pub goal: Amount,
}

pub const TEAM: [SectionCard; 4] = [
    SectionCard {
        title: "Volunteer Coordinators",
        description: "Organize the nightly iftar drives and make sure every food box reaches a family before sunset.",
        image: "/images/team/coordinators.jpg",
    },
    SectionCard {
        title: "Community Partners",
        description: "Local mosques, food banks and shelters who tell us where the need is greatest.",
        image: "/images/team/partners.jpg",
    },
    SectionCard {
        title: "Youth Ambassadors",
        description: "Students who run fundraisers at school and pack care kits on weekends.",
        image: "/images/team/youth.jpg",
    },
    SectionCard {
        title: "Board of Trustees",
        description: "Volunteers who oversee our finances and publish an annual report of every dollar spent.",
        image: "/images/team/trustees.jpg",
    },
];

pub const IMPACT: [SectionCard; 3] = [
    SectionCard {
        title: "Iftar Meals",
        description: "$25 provides a week of iftar meals for a family of four.",
        image: "/images/impact/iftar.jpg",
    },
    SectionCard {
        title: "Eid Gifts for Orphans",
        description: "$50 gives a child new clothes and a gift for Eid morning.",
        image: "/images/impact/eid.jpg",
    },
    SectionCard {
        title: "Zakat al-Fitr",
        description: "Distributed before Eid prayer so that no one goes hungry on the day of celebration.",
        image: "/images/impact/zakat.jpg",
    },
];

pub fn campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            slug: "iftar-meals",
            title: "Feed a Fasting Family",
            summary: "Hot iftar meals delivered every evening of Ramadan.",
            image: CampaignImage::Direct(Cow::Borrowed("/images/campaigns/iftar.jpg")),
            goal: Amount::from_dollars(20_000),
        },
        Campaign {
            slug: "orphan-eid",
            title: "Eid for Every Orphan",
            summary: "Clothes, gifts and a celebration meal for children in our partner orphanages.",
            image: CampaignImage::External(Cow::Borrowed(
                "https://www.launchgood.com/campaign/eid_for_every_orphan",
            )),
            goal: Amount::from_dollars(10_000),
        },
        Campaign {
            slug: "zakat-al-fitr",
            title: "Zakat al-Fitr",
            summary: "Pay your fitrana and we distribute it before Eid prayer.",
            image: CampaignImage::External(Cow::Borrowed(
                "https://www.launchgood.com/campaign/zakat_al_fitr",
            )),
            goal: Amount::from_dollars(15_000),
        },
    ]
}

pub fn find_campaign(slug: &str) -> Option<Campaign> {
    campaigns().into_iter().find(|c| c.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_slugs_are_unique_and_findable() {
        let all = campaigns();
        for campaign in &all {
            assert_eq!(find_campaign(campaign.slug).as_ref(), Some(campaign));
            assert_eq!(all.iter().filter(|c| c.slug == campaign.slug).count(), 1);
        }
        assert!(find_campaign("unknown").is_none());
    }

    #[test]
    fn test_image_references_are_well_formed() {
        for campaign in campaigns() {
            match &campaign.image {
                CampaignImage::Direct(url) => assert!(url.starts_with('/'), "{}", campaign.slug),
                // 只解析 https 外部页面
                CampaignImage::External(url) => {
                    assert!(url.starts_with("https://"), "{}", campaign.slug)
                }
            }
        }
        for card in TEAM.iter().chain(IMPACT.iter()) {
            assert!(card.image.starts_with("/images/"), "{}", card.title);
        }
    }
}
