//! Usage guide shown by /start (private chat) and /help.

pub const HELP_TEXT: &str = r#"🤖 <b>TG 群组反广告机器人 使用说明</b>

<b>📋 主要功能</b>
• AI 智能审核 - 文本/图片/头像/Bio 多维度检测
• 信任系统 - 10条消息后自动信任，信任用户豁免检测
• 夜间静默 - 22:00-09:00 自动删除消息
• 硬关键词拦截 - 秒杀违规内容
• 引用投毒检测 - 防止通过回复/引用传播广告

<b>⚙️ 管理员命令</b>

<b>/addgroup</b>
激活群组防护功能（默认开启夜间静默）
<i>使用场景：将机器人添加到群组后首次使用</i>

<b>/nighton</b> / <b>/nightoff</b>
开启/关闭夜间静默模式（22:00-09:00）
<i>夜间模式下会静默删除所有消息</i>

<b>/unban &lt;用户ID&gt;</b>
解封用户并加入白名单
<i>示例：/unban 123456789</i>

<b>/reset &lt;用户ID&gt;</b>
重置用户状态为新用户（用于测试AI审核）
<i>示例：/reset 123456789</i>

<b>/id</b>
查看当前群组ID和你的用户ID

<b>/start</b>
显示本使用说明（仅私聊有效）

<b>🛡️ 信任系统说明</b>
• 新用户：完整AI审核（头像+Bio+文本+图片）
• 发送10条正常消息后：自动晋升为信任用户
• 信任用户：跳过检测（节省AI费用）
• 抽查机制：信任用户发送链接/转发/图片时，30%概率抽查

<b>🚫 自动拦截规则</b>
1. 名片炸弹 - 立即封禁
2. 硬关键词 - 查档/开户/猎魔/轰炸/上分/烟酒/代付
3. 引用投毒 - 检测回复消息和外部引用中的广告内容
4. AI判定 - 加密货币交易/色情/赌博/黑产等

<b>⚡ 快速开始</b>
1. 将机器人添加为群组管理员（需要删除消息和封禁权限）
2. 在群组发送 <code>/addgroup</code> 激活防护
3. 完成！机器人开始自动工作

<b>📊 环境变量配置</b>
• <code>BOT_TOKEN</code> - 机器人Token
• <code>ADMIN_IDS</code> - 管理员ID（逗号分隔）
• <code>MONGODB_URI</code> - MongoDB 连接串（可选，未设置时使用内存存储）
• <code>AI_API_URL</code> - AI API地址
• <code>AI_API_KEY</code> - AI API密钥
• <code>AI_MODEL</code> - AI模型（可选，默认gpt-4）
• <code>AI_VISION_MODEL</code> - 图片审核模型（可选）
• <code>TZ_OFFSET</code> - 时区偏移（可选，默认8）

<i>💡 提示：所有命令都需要管理员权限才能执行</i>"#;
