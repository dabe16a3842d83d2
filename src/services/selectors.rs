// Class names are the obfuscated ones served by the jobs panel. Exact
// attribute matches unless noted; the employer and url classes carry extra
// tokens so they match on substring.

pub const RESULTS_TREE: &str = "div[role='tree']";

pub const LISTING_CONTAINERS: &str = "div[class='gws-plugins-horizon-jobs__tl-lif']";
pub const DETAIL_PANELS: &str = "div[id='gws-plugins-horizon-jobs__job_details_page']";

pub const TITLE: &str = "h2[class='KLsYvd']";
pub const LOCATION: &str = "div[class='sMzDkb']";
pub const DETAIL_CHIPS: &str = "span[class='LL4CDc']";
pub const DESCRIPTION: &str = "span[class='HBvzbc']";
pub const HIGHLIGHT_BLOCKS: &str = "div[class='JxVj3d']";
pub const HIGHLIGHT_BULLETS: &str = "div[class='IiQJ2c']";
pub const EMPLOYER: &str = "div[class*='nJlQNd']";
pub const URL_ANCHORS: &str = "a[class*='pMhGee']";
